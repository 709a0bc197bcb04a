//! Geographic coordinates and the great-circle offset primitive
//!
//! Zone geometry only ever needs one operation from geodesy: "travel this far
//! on this bearing". It is expressed as the [`Projector`] trait so builders can
//! run against the spherical [`Haversine`] model in production and the
//! [`FlatEarth`] approximation in tests.

pub mod coordinate;
pub mod geodesic;

pub use coordinate::Coordinate;
pub use geodesic::{FlatEarth, Haversine, Projector};
