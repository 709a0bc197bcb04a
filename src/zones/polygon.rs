use serde::{Deserialize, Serialize};

use crate::projection::Coordinate;

/// Ordered sequence of coordinates, closed for boxes and open for curves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    points: Vec<Coordinate>,
}

/// Latitude/longitude extent of a polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// True when `other` lies inside these bounds, allowing `tolerance` degrees of slack
    pub fn contains(&self, other: &Bounds, tolerance: f64) -> bool {
        other.min_lat >= self.min_lat - tolerance
            && other.max_lat <= self.max_lat + tolerance
            && other.min_lon >= self.min_lon - tolerance
            && other.max_lon <= self.max_lon + tolerance
    }
}

impl Polygon {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Number of points, including the closing repeat
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the last point repeats the first
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Even-odd ray cast in the lon/lat plane
    ///
    /// Points exactly on an edge may fall either way. Open curves are treated
    /// as if closed back to their first point.
    pub fn contains(&self, p: Coordinate) -> bool {
        let (x, y) = p.xy();
        let mut inside = false;
        let Some(mut prev) = self.points.last().map(Coordinate::xy) else {
            return false;
        };

        for (xi, yi) in self.points.iter().map(Coordinate::xy) {
            let (xj, yj) = prev;
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            prev = (xi, yi);
        }

        inside
    }

    /// Returns the extent, or `None` for an empty polygon
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let init = Bounds {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };

        Some(self.points.iter().fold(init, |b, p| Bounds {
            min_lat: b.min_lat.min(p.lat),
            max_lat: b.max_lat.max(p.lat),
            min_lon: b.min_lon.min(p.lon),
            max_lon: b.max_lon.max(p.lon),
        }))
    }
}

impl From<Vec<Coordinate>> for Polygon {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_closed() {
        assert!(square().is_closed());
        assert!(!Polygon::default().is_closed());
        assert!(!Polygon::new(vec![Coordinate::new(0.0, 0.0)]).is_closed());
    }

    #[test]
    fn test_bounds() {
        let b = square().bounds().unwrap();
        assert_eq!((b.min_lat, b.max_lat, b.min_lon, b.max_lon), (0.0, 1.0, 0.0, 1.0));
        assert!(Polygon::default().bounds().is_none());
    }

    #[test]
    fn test_bounds_contains_with_tolerance() {
        let outer = square().bounds().unwrap();
        let edge = Bounds { min_lat: -1e-9, max_lat: 0.5, min_lon: 0.0, max_lon: 1.0 };
        assert!(outer.contains(&edge, 1e-6));
        assert!(!outer.contains(&edge, 0.0));
    }

    #[test]
    fn test_contains_point() {
        let sq = square();
        assert!(sq.contains(Coordinate::new(0.5, 0.5)));
        assert!(!sq.contains(Coordinate::new(1.5, 0.5)));
        assert!(!sq.contains(Coordinate::new(0.5, -0.1)));
        assert!(!Polygon::default().contains(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_contains_concave() {
        // U shape open to the north between lon 1 and 2
        let u = Polygon::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 0.0),
            Coordinate::new(0.0, 0.0),
        ]);
        assert!(u.contains(Coordinate::new(2.0, 0.5)));
        assert!(!u.contains(Coordinate::new(2.0, 1.5)));
        assert!(u.contains(Coordinate::new(0.5, 1.5)));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&Polygon::new(vec![Coordinate::new(1.0, 2.0)])).unwrap();
        assert_eq!(json, r#"[{"lat":1.0,"lon":2.0}]"#);
    }
}
