//! Parallel zone construction for many centers

use std::io::{Read, Write};
use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;

use crate::error::Result;
use crate::projection::Projector;
use crate::types::Orientation;
use crate::zones::{ZoneBuilder, ZoneRequest, ZoneSet};

/// One input row: `latitude,longitude,altitude,width,height,orientation[,name]`
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl BatchRow {
    /// Converts the row into a validated request
    pub fn to_request(&self) -> Result<ZoneRequest> {
        let request = ZoneRequest {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            width: self.width,
            height: self.height,
            orientation: self.orientation.trim().parse::<Orientation>()?,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Result for a single input row
#[derive(Debug)]
pub struct BatchOutcome {
    pub row: usize,
    pub name: Option<String>,
    pub altitude: f64,
    pub zones: std::result::Result<ZoneSet, String>,
}

/// Aggregate counts for a batch run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub execution_time_ms: f64,
}

/// Reads rows from CSV; malformed rows are kept as errors
pub fn read_rows<R: Read>(reader: R) -> Vec<std::result::Result<BatchRow, String>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader)
        .deserialize()
        .map(|row| row.map_err(|e| e.to_string()))
        .collect()
}

/// Builds zones for every row in parallel, keeping input order
pub fn run<P: Projector>(
    builder: &ZoneBuilder<P>,
    rows: Vec<std::result::Result<BatchRow, String>>,
) -> (Vec<BatchOutcome>, BatchSummary) {
    let start = Instant::now();

    let outcomes: Vec<BatchOutcome> = rows
        .into_par_iter()
        .enumerate()
        .map(|(row, parsed)| match parsed {
            Ok(input) => {
                let zones = input
                    .to_request()
                    .and_then(|req| builder.build_all(&req))
                    .map_err(|e| e.to_string());
                BatchOutcome {
                    row,
                    name: input.name,
                    altitude: input.altitude,
                    zones,
                }
            }
            Err(e) => BatchOutcome {
                row,
                name: None,
                altitude: 0.0,
                zones: Err(e),
            },
        })
        .collect();

    let successful = outcomes.iter().filter(|o| o.zones.is_ok()).count();
    let summary = BatchSummary {
        total: outcomes.len(),
        successful,
        failed: outcomes.len() - successful,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    log::info!(
        "batch of {} centers: {} ok, {} failed in {:.2} ms",
        summary.total, summary.successful, summary.failed, summary.execution_time_ms
    );

    (outcomes, summary)
}

#[derive(serde::Serialize)]
struct BatchPoint<'a> {
    row: usize,
    name: &'a str,
    label: &'a str,
    index: usize,
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

/// Writes outcomes as CSV preceded by a `# Statistics` comment block
///
/// Failed rows are listed in the comment block with their error.
pub fn write_csv<W: Write>(
    mut writer: W,
    outcomes: &[BatchOutcome],
    summary: &BatchSummary,
) -> Result<()> {
    writeln!(writer, "# Statistics")?;
    writeln!(writer, "# Total centers: {}", summary.total)?;
    writeln!(writer, "# Successful: {}", summary.successful)?;
    writeln!(writer, "# Failed: {}", summary.failed)?;
    writeln!(writer, "# Execution time: {:.2} ms", summary.execution_time_ms)?;
    for outcome in outcomes {
        if let Err(e) = &outcome.zones {
            writeln!(writer, "# Row {}: {}", outcome.row, e)?;
        }
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["row", "name", "label", "index", "latitude", "longitude", "altitude"])?;

    for outcome in outcomes {
        let Ok(zones) = &outcome.zones else { continue };
        let name = outcome.name.as_deref().unwrap_or("");

        for (label, curve) in zones.curves() {
            for (index, p) in curve.points().iter().enumerate() {
                csv_writer.serialize(BatchPoint {
                    row: outcome.row,
                    name,
                    label,
                    index,
                    latitude: p.lat,
                    longitude: p.lon,
                    altitude: outcome.altitude,
                })?;
            }
        }
    }

    csv_writer.flush()?;
    Ok(())
}
