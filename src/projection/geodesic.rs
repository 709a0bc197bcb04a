use crate::projection::coordinate::Coordinate;
use crate::types::{Unit, EARTH_RADIUS_KM};

/// Moves a point a given distance along a given bearing
///
/// Bearings are radians clockwise from north. Distances are in whatever unit
/// the implementation was built for.
pub trait Projector: Send + Sync {
    /// Returns the point reached from `from` after `distance` on `bearing`
    fn offset(&self, from: Coordinate, distance: f64, bearing: f64) -> Coordinate;

    /// Returns the surface distance between two points
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64;
}

impl<P: Projector + ?Sized> Projector for &P {
    fn offset(&self, from: Coordinate, distance: f64, bearing: f64) -> Coordinate {
        (**self).offset(from, distance, bearing)
    }

    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        (**self).distance(a, b)
    }
}

/// Spherical earth model using the haversine / inverse-haversine formulas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Haversine {
    unit: Unit,
}

impl Haversine {
    /// Creates a projector working in `unit`
    pub fn new(unit: Unit) -> Self {
        Self { unit }
    }

    /// Returns the distance unit
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl Projector for Haversine {
    fn offset(&self, from: Coordinate, distance: f64, bearing: f64) -> Coordinate {
        let lat = from.lat.to_radians();
        let lon = from.lon.to_radians();
        let d = distance / self.unit.earth_radius();

        let (sin_d, cos_d) = d.sin_cos();
        let (sin_lat, cos_lat) = lat.sin_cos();

        let out_lat = (sin_lat * cos_d + cos_lat * sin_d * bearing.cos()).asin();
        // longitude is left unwrapped, callers plot it as-is
        let out_lon = lon
            + (bearing.sin() * sin_d * cos_lat).atan2(cos_d - sin_lat * out_lat.sin());

        Coordinate::new(out_lat.to_degrees(), out_lon.to_degrees())
    }

    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (b.lon - a.lon).to_radians();

        let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
        2.0 * self.unit.earth_radius() * h.sqrt().asin()
    }
}

/// Equirectangular approximation, accurate for short offsets away from the poles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatEarth {
    units_per_degree: f64,
}

impl FlatEarth {
    /// Creates a flat projector with a fixed scale along a meridian
    pub fn new(units_per_degree: f64) -> Self {
        Self { units_per_degree }
    }

    /// Flat projector scaled to match the mean-radius sphere in `unit`
    pub fn for_unit(unit: Unit) -> Self {
        let km_per_degree = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        Self::new(km_per_degree / unit.kilometers())
    }

    fn lon_scale(&self, lat: f64) -> f64 {
        self.units_per_degree * lat.to_radians().cos()
    }
}

impl Default for FlatEarth {
    fn default() -> Self {
        Self::for_unit(Unit::Kilometers)
    }
}

impl Projector for FlatEarth {
    fn offset(&self, from: Coordinate, distance: f64, bearing: f64) -> Coordinate {
        let (sin_b, cos_b) = bearing.sin_cos();
        Coordinate::new(
            from.lat + distance * cos_b / self.units_per_degree,
            from.lon + distance * sin_b / self.lon_scale(from.lat),
        )
    }

    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let mid_lat = (a.lat + b.lat) * 0.5;
        let dy = (b.lat - a.lat) * self.units_per_degree;
        let dx = (b.lon - a.lon) * self.lon_scale(mid_lat);
        dx.hypot(dy)
    }
}
