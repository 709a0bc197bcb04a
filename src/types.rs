//! Core tag types for zonekit

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which rectangle edge a zone faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// All four orientations
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Returns the command-line literal for this orientation
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::South => "south",
            Orientation::East => "east",
            Orientation::West => "west",
        }
    }

    /// True when the primary axis runs along height rather than width
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::North | Orientation::South)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Orientation::North),
            "south" => Ok(Orientation::South),
            "east" => Ok(Orientation::East),
            "west" => Ok(Orientation::West),
            other => Err(Error::InvalidOrientation(other.to_string())),
        }
    }
}

/// Cardinal compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Compass bearing in radians, clockwise from north
    pub fn bearing(&self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::East => FRAC_PI_2,
            Direction::South => PI,
            Direction::West => PI + FRAC_PI_2,
        }
    }

    /// The other direction on the same axis
    pub fn opposite(&self) -> Direction {
        const NORTH_SOUTH: [Direction; 2] = [Direction::North, Direction::South];
        const EAST_WEST: [Direction; 2] = [Direction::East, Direction::West];

        let axis = if NORTH_SOUTH.contains(self) {
            NORTH_SOUTH
        } else {
            EAST_WEST
        };
        // index 0 <-> 1 within the axis pair
        if axis[0] == *self {
            axis[1]
        } else {
            axis[0]
        }
    }
}

impl From<Orientation> for Direction {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::North => Direction::North,
            Orientation::South => Direction::South,
            Orientation::East => Direction::East,
            Orientation::West => Direction::West,
        }
    }
}

/// Distance unit accepted by the great-circle projector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    Kilometers,
    Meters,
    Miles,
    NauticalMiles,
}

/// Mean earth radius in kilometers (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

impl Unit {
    /// Kilometers per one of this unit
    pub fn kilometers(&self) -> f64 {
        match self {
            Unit::Kilometers => 1.0,
            Unit::Meters => 0.001,
            Unit::Miles => 1.609344,
            Unit::NauticalMiles => 1.852,
        }
    }

    /// Mean earth radius expressed in this unit
    pub fn earth_radius(&self) -> f64 {
        EARTH_RADIUS_KM / self.kilometers()
    }
}
