use std::f64::consts::FRAC_PI_2;

use crate::error::{Error, Result};
use crate::projection::{Coordinate, Haversine, Projector};
use crate::types::{Direction, Orientation};
use crate::zones::config::ZoneConfig;
use crate::zones::polygon::Polygon;
use crate::zones::request::{ZoneRequest, ZoneSet};

/// Points per red boundary segment
const RED_SEGMENT_POINTS: usize = 5;

/// Relabels (width, height) as (primary, secondary) for an orientation
///
/// North/south zones swap the two; east/west keep them.
pub fn primary_secondary(width: f64, height: f64, orientation: Orientation) -> (f64, f64) {
    if orientation.is_vertical() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Compass direction a zone faces
pub fn orientation_to_direction(orientation: Orientation) -> Direction {
    Direction::from(orientation)
}

/// Antipodal cardinal direction on the same axis
pub fn opposite_dir(direction: Direction) -> Direction {
    direction.opposite()
}

/// Builds the nested zone polygons around a center point
///
/// Every method is a pure function of its arguments, the projector and the
/// configuration.
#[derive(Debug, Clone)]
pub struct ZoneBuilder<P = Haversine> {
    projector: P,
    config: ZoneConfig,
}

impl Default for ZoneBuilder<Haversine> {
    fn default() -> Self {
        Self {
            projector: Haversine::default(),
            config: ZoneConfig::default(),
        }
    }
}

impl<P: Projector> ZoneBuilder<P> {
    /// Creates a builder, rejecting an invalid configuration
    pub fn new(projector: P, config: ZoneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { projector, config })
    }

    /// Creates a builder with the default configuration
    pub fn with_projector(projector: P) -> Self {
        Self {
            projector,
            config: ZoneConfig::default(),
        }
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    fn offset(&self, from: Coordinate, distance: f64, bearing: f64) -> Coordinate {
        self.projector.offset(from, distance, bearing)
    }

    /// Closed box with `primary_len` east-west and `secondary_len` north-south
    ///
    /// Points run `[top_left, bottom_left, bottom_right, top_right, top_left]`.
    pub fn build_box(&self, center: Coordinate, primary_len: f64, secondary_len: f64) -> Polygon {
        let half_primary = primary_len / 2.0;
        let half_secondary = secondary_len / 2.0;

        let left = self.offset(center, half_primary, Direction::West.bearing());
        let top_left = self.offset(left, half_secondary, Direction::North.bearing());
        let bottom_left = self.offset(left, half_secondary, Direction::South.bearing());

        let right = self.offset(center, half_primary, Direction::East.bearing());
        let top_right = self.offset(right, half_secondary, Direction::North.bearing());
        let bottom_right = self.offset(right, half_secondary, Direction::South.bearing());

        Polygon::new(vec![top_left, bottom_left, bottom_right, top_right, top_left])
    }

    /// Full-size bounding box around `center`
    pub fn build_sanitize(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> Polygon {
        let (primary, secondary) = primary_secondary(width, height, orientation);
        self.build_box(center, primary, secondary)
    }

    /// Box shifted away from the facing edge and shrunk by `commit_offset`
    pub fn build_commit(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> Polygon {
        self.build_inset(center, width, height, orientation, self.config.commit_offset)
    }

    /// Same construction as the commit box with `hostile_offset`
    pub fn build_hostile(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> Polygon {
        self.build_inset(center, width, height, orientation, self.config.hostile_offset)
    }

    fn build_inset(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
        fraction: f64,
    ) -> Polygon {
        let (primary, secondary) = primary_secondary(width, height, orientation);
        let shifted = self.inset_center(center, secondary, orientation, fraction);
        self.build_box(shifted, primary, secondary * (1.0 - fraction * 2.0))
    }

    fn inset_center(
        &self,
        center: Coordinate,
        secondary: f64,
        orientation: Orientation,
        fraction: f64,
    ) -> Coordinate {
        let opposite = opposite_dir(orientation_to_direction(orientation));
        self.offset(center, secondary * fraction, opposite.bearing())
    }

    /// Point the cap arcs would start from
    ///
    /// A full `secondary` behind the center, then half of `primary` to the
    /// side at `opposite - 90°`.
    pub fn cap_anchor(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> Coordinate {
        let opposite = opposite_dir(orientation_to_direction(orientation)).bearing();
        let (primary, secondary) = primary_secondary(width, height, orientation);

        let down = self.offset(center, secondary, opposite);
        self.offset(down, primary / 2.0, opposite - FRAC_PI_2)
    }

    /// Arc-shaped caps at the far edge of the zone
    ///
    /// The arc geometry has never been defined, so this always fails with
    /// [`Error::NotImplemented`] after resolving the anchor point.
    pub fn build_caps(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> Result<(Polygon, Polygon)> {
        let anchor = self.cap_anchor(center, width, height, orientation);
        log::trace!("cap anchor for {} zone at {}", orientation, anchor);

        // TODO: define the counter-clockwise arc sweep starting at `anchor`
        Err(Error::NotImplemented("cap arc geometry".to_string()))
    }

    /// Two mirrored red boundary curves of fifteen points each
    ///
    /// Built from three five-point segments: an outer taper running back
    /// from far in front of the zone, a fan spreading sideways from the
    /// hostile tip, and a sweep around the center.
    pub fn build_reds(
        &self,
        center: Coordinate,
        width: f64,
        height: f64,
        orientation: Orientation,
    ) -> (Polygon, Polygon) {
        let direction = orientation_to_direction(orientation);
        let facing = direction.bearing();
        let opposite = opposite_dir(direction).bearing();
        let (primary, secondary) = primary_secondary(width, height, orientation);
        let cfg = &self.config;

        let mut res1 = Vec::with_capacity(RED_SEGMENT_POINTS * 3);
        let mut res2 = Vec::with_capacity(RED_SEGMENT_POINTS * 3);

        // outer taper
        let start = self.offset(center, (secondary / 2.0) * cfg.red_start_factor, facing);
        let dist = (secondary / 2.0) * cfg.red_start_factor - (secondary / 2.0);
        for i in 0..RED_SEGMENT_POINTS {
            let offset = self.offset(start, dist * (i as f64 / 5.0), opposite);
            res1.push(self.offset(offset, cfg.red_taper_width, opposite - FRAC_PI_2));
            res2.push(self.offset(offset, cfg.red_taper_width, opposite + FRAC_PI_2));
        }

        // hostile tip fan
        let hostile_center = self.inset_center(center, secondary, orientation, cfg.hostile_offset);
        let hostile_tip = self.offset(
            hostile_center,
            (secondary * (1.0 - cfg.hostile_offset * 2.0)) / 3.0,
            facing,
        );
        for i in 0..RED_SEGMENT_POINTS {
            let dist = (primary / 2.0) * ((i as f64 + 2.0) / 6.0);
            res1.push(self.offset(hostile_tip, dist, opposite - FRAC_PI_2));
            res2.push(self.offset(hostile_tip, dist, opposite + FRAC_PI_2));
        }

        // outer sweep
        for i in RED_SEGMENT_POINTS..RED_SEGMENT_POINTS * 2 {
            let i = i as f64;
            let dist = (primary / 2.0) + (5.0 * i / 10.0);
            let delta = FRAC_PI_2 + (i / 6.0);
            res1.push(self.offset(center, dist, opposite - delta));
            res2.push(self.offset(center, dist, opposite + delta));
        }

        (Polygon::new(res1), Polygon::new(res2))
    }

    /// Runs every builder for one request
    ///
    /// Caps come back empty while their geometry is unimplemented; any other
    /// failure is returned.
    pub fn build_all(&self, request: &ZoneRequest) -> Result<ZoneSet> {
        request.validate()?;

        let center = request.center();
        let ZoneRequest { width, height, orientation, .. } = *request;
        log::debug!(
            "building zones at {} ({} x {}, facing {})",
            center, width, height, orientation
        );

        let (cap1, cap2) = match self.build_caps(center, width, height, orientation) {
            Ok(caps) => caps,
            Err(Error::NotImplemented(what)) => {
                log::warn!("{} is not implemented, caps left empty", what);
                (Polygon::default(), Polygon::default())
            }
            Err(e) => return Err(e),
        };
        let (red1, red2) = self.build_reds(center, width, height, orientation);

        Ok(ZoneSet {
            sanitize: self.build_sanitize(center, width, height, orientation),
            commit: self.build_commit(center, width, height, orientation),
            hostile: self.build_hostile(center, width, height, orientation),
            cap1,
            cap2,
            red1,
            red2,
        })
    }
}
