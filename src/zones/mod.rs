//! Zone geometry: sanitize, commit and hostile boxes, caps and red boundaries
//!
//! All shapes derive from one center, a width/height pair and an
//! [`Orientation`](crate::types::Orientation) through successive great-circle
//! offsets. The orientation decides which of width/height is the primary
//! (east-west) extent and which edge the zone faces.

pub mod builder;
pub mod config;
pub mod polygon;
pub mod request;

pub use builder::{opposite_dir, orientation_to_direction, primary_secondary, ZoneBuilder};
pub use config::ZoneConfig;
pub use polygon::{Bounds, Polygon};
pub use request::{parse_number, ZoneRequest, ZoneSet, CURVE_LABELS};
