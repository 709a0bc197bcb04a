use std::io::Write;

use crate::error::Result;
use crate::output::PlotSink;
use crate::zones::Polygon;

const RULE: &str = "---------------";

/// Prints each curve as a labelled block of `{ lat, lon, alt }` records
///
/// ```text
/// ---------------
/// - sanitize -
/// ---------------
///  - { lat: 33.69659_deg, lon: -117.78804_deg, alt: 0.0_deg }
/// ```
pub struct RecordSink<W: Write> {
    writer: W,
    altitude: f64,
}

impl<W: Write> RecordSink<W> {
    /// Every record carries the same display altitude
    pub fn new(writer: W, altitude: f64) -> Self {
        Self { writer, altitude }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlotSink for RecordSink<W> {
    fn plot(&mut self, label: &str, curve: &Polygon) -> Result<()> {
        writeln!(self.writer, "{}", RULE)?;
        writeln!(self.writer, "- {} -", label)?;
        writeln!(self.writer, "{}", RULE)?;
        for point in curve {
            writeln!(
                self.writer,
                " - {{ lat: {:?}_deg, lon: {:?}_deg, alt: {:?}_deg }}",
                point.lat, point.lon, self.altitude
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
