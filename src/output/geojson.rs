use std::io::Write;

use serde_json::{json, Value};

use crate::error::Result;
use crate::output::PlotSink;
use crate::zones::{Polygon, ZoneSet};

/// Collects curves into a GeoJSON `FeatureCollection`
///
/// Closed curves become `Polygon` features and open ones `LineString`
/// features. Curves with fewer than two points, such as the empty caps, get
/// a `null` geometry. Positions are `[lon, lat, alt]`.
pub struct GeoJsonSink<W: Write> {
    writer: W,
    altitude: f64,
    features: Vec<Value>,
}

impl<W: Write> GeoJsonSink<W> {
    pub fn new(writer: W, altitude: f64) -> Self {
        Self {
            writer,
            altitude,
            features: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Builds one feature for a labelled curve
pub fn feature(label: &str, curve: &Polygon, altitude: f64) -> Value {
    let positions: Vec<[f64; 3]> = curve
        .points()
        .iter()
        .map(|p| {
            let (x, y) = p.xy();
            [x, y, altitude]
        })
        .collect();

    let geometry = if positions.len() < 2 {
        Value::Null
    } else if curve.is_closed() {
        json!({ "type": "Polygon", "coordinates": [positions] })
    } else {
        json!({ "type": "LineString", "coordinates": positions })
    };

    json!({
        "type": "Feature",
        "properties": { "label": label },
        "geometry": geometry,
    })
}

/// Builds the whole collection for one zone set
pub fn feature_collection(zones: &ZoneSet, altitude: f64) -> Value {
    let features: Vec<Value> = zones
        .curves()
        .iter()
        .map(|(label, curve)| feature(label, curve, altitude))
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

impl<W: Write> PlotSink for GeoJsonSink<W> {
    fn plot(&mut self, label: &str, curve: &Polygon) -> Result<()> {
        self.features.push(feature(label, curve, self.altitude));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let features = std::mem::take(&mut self.features);
        let collection = json!({ "type": "FeatureCollection", "features": features });
        serde_json::to_writer_pretty(&mut self.writer, &collection)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
