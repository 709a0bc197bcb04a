//! Error types for zonekit

use std::io;

/// Result type for zonekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in zonekit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Orientation tag outside north/south/east/west
    #[error("Invalid orientation: {0:?} (expected north, south, east or west)")]
    InvalidOrientation(String),

    /// Malformed or out-of-range input argument
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Capability that exists in the API but has no geometry behind it yet
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Invalid builder configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// CSV encode/decode error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`]
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
