use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default inset fraction of the commit zone
pub const COMMIT_OFFSET: f64 = 0.1;

/// Default inset fraction of the hostile zone
pub const HOSTILE_OFFSET: f64 = 0.2;

/// Default distance multiplier of the red boundary start point
pub const RED_START_FACTOR: f64 = 4.0;

/// Default perpendicular half-width of the red outer taper
pub const RED_TAPER_WIDTH: f64 = 0.5;

/// Numeric knobs of the zone builder
///
/// Missing fields in a JSON document fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub commit_offset: f64,
    pub hostile_offset: f64,
    pub red_start_factor: f64,
    pub red_taper_width: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            commit_offset: COMMIT_OFFSET,
            hostile_offset: HOSTILE_OFFSET,
            red_start_factor: RED_START_FACTOR,
            red_taper_width: RED_TAPER_WIDTH,
        }
    }
}

impl ZoneConfig {
    /// Loads a configuration from a JSON file and validates it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: ZoneConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is finite and inside its usable range
    pub fn validate(&self) -> Result<()> {
        for (name, offset) in [
            ("commit_offset", self.commit_offset),
            ("hostile_offset", self.hostile_offset),
        ] {
            if !(offset > 0.0 && offset < 0.5) {
                return Err(Error::Config(format!(
                    "{} must be in (0, 0.5), got {}",
                    name, offset
                )));
            }
        }

        if !(self.red_start_factor.is_finite() && self.red_start_factor > 1.0) {
            return Err(Error::Config(format!(
                "red_start_factor must be greater than 1, got {}",
                self.red_start_factor
            )));
        }

        if !(self.red_taper_width.is_finite() && self.red_taper_width >= 0.0) {
            return Err(Error::Config(format!(
                "red_taper_width must be non-negative, got {}",
                self.red_taper_width
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = ZoneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.commit_offset, 0.1);
        assert_eq!(config.hostile_offset, 0.2);
        assert_eq!(config.red_start_factor, 4.0);
    }

    #[test]
    fn test_offset_bounds() {
        let config = ZoneConfig { commit_offset: 0.5, ..ZoneConfig::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ZoneConfig { hostile_offset: 0.0, ..ZoneConfig::default() };
        assert!(config.validate().is_err());

        let config = ZoneConfig { hostile_offset: f64::NAN, ..ZoneConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_red_factor_bounds() {
        let config = ZoneConfig { red_start_factor: 1.0, ..ZoneConfig::default() };
        assert!(config.validate().is_err());

        let config = ZoneConfig { red_taper_width: -0.1, ..ZoneConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "hostile_offset": 0.25 }}"#).unwrap();

        let config = ZoneConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.hostile_offset, 0.25);
        assert_eq!(config.commit_offset, COMMIT_OFFSET);
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "commit_offset": 0.75 }}"#).unwrap();

        assert!(matches!(
            ZoneConfig::from_json_file(file.path()),
            Err(Error::Config(_))
        ));
    }
}
