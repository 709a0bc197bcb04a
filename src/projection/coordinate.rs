use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Represents a geographic point in degrees (WGS84 sphere)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a new coordinate from latitude/longitude in degrees
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a coordinate after checking both axes are finite and in range
    pub fn checked(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::invalid_argument(
                "latitude",
                format!("{} is outside -90..90 degrees", lat),
            ));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::invalid_argument(
                "longitude",
                format!("{} is outside -180..180 degrees", lon),
            ));
        }
        Ok(Self::new(lat, lon))
    }

    /// Returns `(lon, lat)`, the x/y order used for plotting
    pub fn xy(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
