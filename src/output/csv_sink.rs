use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::output::PlotSink;
use crate::zones::Polygon;

/// One output row per curve point
#[derive(Debug, Serialize)]
pub struct CurvePoint<'a> {
    pub label: &'a str,
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Writes curves as `label,index,latitude,longitude,altitude` rows
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    altitude: f64,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, altitude: f64) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            altitude,
        }
    }
}

impl<W: Write> PlotSink for CsvSink<W> {
    fn plot(&mut self, label: &str, curve: &Polygon) -> Result<()> {
        for (index, point) in curve.points().iter().enumerate() {
            self.writer.serialize(CurvePoint {
                label,
                index,
                latitude: point.lat,
                longitude: point.lon,
                altitude: self.altitude,
            })?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
