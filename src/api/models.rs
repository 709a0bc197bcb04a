use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::zones::{ZoneRequest, ZoneSet};

/// Raw query parameters; numbers stay text so parse errors can name them
#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneQuery {
    pub latitude: String,
    pub longitude: String,
    #[serde(default = "default_altitude")]
    pub altitude: String,
    pub width: String,
    pub height: String,
    pub orientation: String,
}

fn default_altitude() -> String {
    "0".to_string()
}

impl ZoneQuery {
    /// Parses every parameter the same way as the command-line arguments
    pub fn to_request(&self) -> Result<ZoneRequest> {
        ZoneRequest::parse(
            &self.latitude,
            &self.longitude,
            &self.altitude,
            &self.width,
            &self.height,
            &self.orientation,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub request: ZoneRequest,
    pub zones: ZoneSet,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
