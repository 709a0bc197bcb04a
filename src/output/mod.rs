//! Plot sinks consuming labelled zone curves
//!
//! A sink receives each curve of a [`ZoneSet`] together with its label, in
//! the fixed order `sanitize, commit, hostile, cap1, cap2, red1, red2`.

pub mod csv_sink;
pub mod geojson;
pub mod records;

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};
use crate::zones::{Polygon, ZoneSet};

pub use csv_sink::CsvSink;
pub use geojson::GeoJsonSink;
pub use records::RecordSink;

/// Consumer of labelled curves
pub trait PlotSink {
    /// Receives one curve
    fn plot(&mut self, label: &str, curve: &Polygon) -> Result<()>;

    /// Called once after the last curve
    fn finish(&mut self) -> Result<()>;
}

/// Feeds every curve of `zones` to `sink` and finishes it
pub fn render<S: PlotSink + ?Sized>(zones: &ZoneSet, sink: &mut S) -> Result<()> {
    for (label, curve) in zones.curves() {
        log::trace!("plotting {} ({} points)", label, curve.len());
        sink.plot(label, curve)?;
    }
    sink.finish()
}

/// Output encodings understood by [`sink_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{ lat, lon, alt }` text records
    #[default]
    Records,
    GeoJson,
    Csv,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Records => "records",
            OutputFormat::GeoJson => "geojson",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "records" => Ok(OutputFormat::Records),
            "geojson" => Ok(OutputFormat::GeoJson),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::invalid_argument(
                "format",
                format!("{:?} is not one of records, geojson, csv", other),
            )),
        }
    }
}

/// Boxes a sink of the requested format around `writer`
pub fn sink_for<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    altitude: f64,
) -> Box<dyn PlotSink + 'w> {
    match format {
        OutputFormat::Records => Box::new(RecordSink::new(writer, altitude)),
        OutputFormat::GeoJson => Box::new(GeoJsonSink::new(writer, altitude)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer, altitude)),
    }
}

/// Destination for rendered output
///
/// Must be closed with [`Output::finish`]; dropping it silently discards the
/// errors of the final write, including the gzip trailer.
pub enum Output {
    Plain(Box<dyn Write>),
    Gzip(GzEncoder<Box<dyn Write>>),
}

impl Output {
    pub fn plain(writer: impl Write + 'static) -> Self {
        Output::Plain(Box::new(writer))
    }

    pub fn gzip(writer: impl Write + 'static) -> Self {
        Output::Gzip(GzEncoder::new(Box::new(writer), Compression::default()))
    }

    /// Writes any trailer and flushes everything down to the destination
    pub fn finish(self) -> Result<()> {
        let mut inner = match self {
            Output::Plain(writer) => writer,
            Output::Gzip(encoder) => encoder.finish()?,
        };
        inner.flush()?;
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(writer) => writer.write(buf),
            Output::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(writer) => writer.flush(),
            Output::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Opens the destination for rendered output
///
/// `None` or `-` is stdout; a path ending in `.gz` is gzip-compressed.
pub fn open_output(path: Option<&Path>) -> Result<Output> {
    let path = match path {
        Some(p) if p.as_os_str() != "-" => p,
        _ => return Ok(Output::plain(io::stdout().lock())),
    };

    let file = BufWriter::new(File::create(path)?);
    let gzip = path.extension().is_some_and(|ext| ext == "gz");
    log::debug!("writing output to {} (gzip: {})", path.display(), gzip);

    if gzip {
        Ok(Output::gzip(file))
    } else {
        Ok(Output::plain(file))
    }
}
