//! zonekit - nested operational zone geometry around a geographic point
//!
//! Given a center, a width/height pair and a facing [`Orientation`], zonekit
//! derives a full-size sanitize box, inset commit and hostile boxes, the
//! (still unimplemented) cap arcs and two mirrored red boundary curves, all
//! through great-circle offsets.
//!
//! # Examples
//!
//! ## Building one zone set
//!
//! ```
//! use zonekit::{Orientation, ZoneBuilder, ZoneRequest};
//!
//! let request = ZoneRequest {
//!     latitude: 33.687607,
//!     longitude: -117.782648,
//!     altitude: 0.0,
//!     width: 2.0,
//!     height: 1.0,
//!     orientation: Orientation::North,
//! };
//!
//! let zones = ZoneBuilder::default().build_all(&request)?;
//! assert_eq!(zones.sanitize.len(), 5);
//! assert_eq!(zones.red1.len(), 15);
//! # Ok::<(), zonekit::Error>(())
//! ```
//!
//! ## Printing records
//!
//! ```
//! use zonekit::output::RecordSink;
//! use zonekit::{Coordinate, Orientation, ZoneBuilder};
//!
//! let builder = ZoneBuilder::default();
//! let center = Coordinate::new(33.687607, -117.782648);
//! let sanitize = builder.build_sanitize(center, 2.0, 1.0, Orientation::East);
//!
//! let mut sink = RecordSink::new(std::io::stdout(), 0.0);
//! zonekit::output::PlotSink::plot(&mut sink, "sanitize", &sanitize)?;
//! # Ok::<(), zonekit::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod projection;
pub mod zones;
pub mod output;
pub mod batch;
pub mod cache;
pub mod api;

pub use error::{Error, Result};
pub use types::{Direction, Orientation, Unit};
pub use projection::{Coordinate, FlatEarth, Haversine, Projector};
pub use zones::{
    opposite_dir, orientation_to_direction, primary_secondary,
    Polygon, ZoneBuilder, ZoneConfig, ZoneRequest, ZoneSet,
};
