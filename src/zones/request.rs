use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::Coordinate;
use crate::types::Orientation;
use crate::zones::polygon::Polygon;

/// Labels of the seven curves in one zone set, in render order
pub const CURVE_LABELS: [&str; 7] = [
    "sanitize", "commit", "hostile", "cap1", "cap2", "red1", "red2",
];

/// Inputs of one zone construction run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Display-only altitude carried through to the output records
    #[serde(default)]
    pub altitude: f64,
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl ZoneRequest {
    /// Parses the six textual arguments in command-line order
    pub fn parse(
        latitude: &str,
        longitude: &str,
        altitude: &str,
        width: &str,
        height: &str,
        orientation: &str,
    ) -> Result<Self> {
        let request = Self {
            latitude: parse_number("latitude", latitude)?,
            longitude: parse_number("longitude", longitude)?,
            altitude: parse_number("altitude", altitude)?,
            width: parse_number("width", width)?,
            height: parse_number("height", height)?,
            orientation: orientation.parse()?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Rejects out-of-range coordinates and non-positive dimensions
    pub fn validate(&self) -> Result<()> {
        Coordinate::checked(self.latitude, self.longitude)?;

        if !self.altitude.is_finite() {
            return Err(Error::invalid_argument("altitude", "must be finite"));
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::invalid_argument(
                    name,
                    format!("must be a positive distance, got {}", value),
                ));
            }
        }

        Ok(())
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Parses a float argument, naming it in the error
pub fn parse_number(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| Error::invalid_argument(name, format!("{:?} is not a number ({})", raw, e)))
}

/// The seven labelled curves produced for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSet {
    pub sanitize: Polygon,
    pub commit: Polygon,
    pub hostile: Polygon,
    pub cap1: Polygon,
    pub cap2: Polygon,
    pub red1: Polygon,
    pub red2: Polygon,
}

impl ZoneSet {
    /// Curves paired with their labels, in render order
    pub fn curves(&self) -> [(&'static str, &Polygon); 7] {
        [
            (CURVE_LABELS[0], &self.sanitize),
            (CURVE_LABELS[1], &self.commit),
            (CURVE_LABELS[2], &self.hostile),
            (CURVE_LABELS[3], &self.cap1),
            (CURVE_LABELS[4], &self.cap2),
            (CURVE_LABELS[5], &self.red1),
            (CURVE_LABELS[6], &self.red2),
        ]
    }

    /// Total number of points across all curves
    pub fn point_count(&self) -> usize {
        self.curves().iter().map(|(_, c)| c.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let req = ZoneRequest::parse("33.687607", "-117.782648", "100", "2.0", "1.0", "north").unwrap();
        assert_eq!(req.orientation, Orientation::North);
        assert_eq!(req.center(), Coordinate::new(33.687607, -117.782648));
        assert_eq!(req.altitude, 100.0);
    }

    #[test]
    fn test_parse_names_bad_argument() {
        let err = ZoneRequest::parse("33.6", "-117.7", "0", "wide", "1.0", "north").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "width"));

        let err = ZoneRequest::parse("33.6", "-117.7", "0", "2.0", "-1", "north").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "height"));

        let err = ZoneRequest::parse("95", "-117.7", "0", "2.0", "1", "north").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "latitude"));
    }

    #[test]
    fn test_parse_bad_orientation() {
        let err = ZoneRequest::parse("33.6", "-117.7", "0", "2.0", "1.0", "up").unwrap_err();
        assert!(matches!(err, Error::InvalidOrientation(ref s) if s == "up"));
    }

    #[test]
    fn test_parse_number_trims() {
        assert_eq!(parse_number("x", " 1.5 ").unwrap(), 1.5);
        assert!(parse_number("x", "").is_err());
    }
}
