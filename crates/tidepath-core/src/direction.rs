//! Compass directions and 16-step headings.
//!
//! [`Direction`] is one of the eight grid moves. [`Heading`] is the finer
//! 16-step compass a vessel reports (`0` = north, clockwise, `π/8` per
//! step); every direction sits on an even heading.

use std::fmt;

use crate::geom::Point;

/// One of the eight grid moves, clockwise from north.
///
/// Y grows downward, so north is `(0, -1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Clockwise index, `0..8`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a clockwise index; wraps modulo 8.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % 8]
    }

    /// Unit step for this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::NorthEast => Point::new(1, -1),
            Self::East => Point::new(1, 0),
            Self::SouthEast => Point::new(1, 1),
            Self::South => Point::new(0, 1),
            Self::SouthWest => Point::new(-1, 1),
            Self::West => Point::new(-1, 0),
            Self::NorthWest => Point::new(-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The two orthogonal components of a diagonal, e.g. `NorthEast` →
    /// `(North, East)`. Orthogonal directions return themselves twice.
    #[inline]
    pub const fn components(self) -> (Self, Self) {
        if self.is_diagonal() {
            (
                Self::from_index(self.index() + 7),
                Self::from_index(self.index() + 1),
            )
        } else {
            (self, self)
        }
    }

    /// Bit used for this direction in collision masks.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    #[inline]
    pub const fn heading(self) -> Heading {
        Heading((self.index() * 2) as u8)
    }

    /// Direction of the step from `(0, 0)` towards `(dx, dy)`, by sign.
    /// Returns `None` for the zero vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Self::North),
            (1, -1) => Some(Self::NorthEast),
            (1, 0) => Some(Self::East),
            (1, 1) => Some(Self::SouthEast),
            (0, 1) => Some(Self::South),
            (-1, 1) => Some(Self::SouthWest),
            (-1, 0) => Some(Self::West),
            (-1, -1) => Some(Self::NorthWest),
            _ => None,
        }
    }

    /// Like [`Direction::from_delta`], but only for deltas that lie exactly
    /// on a compass line (orthogonal or 45°).
    pub fn along(dx: i32, dy: i32) -> Option<Self> {
        if dx == 0 || dy == 0 || dx.abs() == dy.abs() {
            Self::from_delta(dx, dy)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

/// A 16-step compass heading.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading(u8);

impl Heading {
    pub const STEPS: i32 = 16;

    /// Create a heading, wrapping modulo 16.
    #[inline]
    pub const fn new(step: i32) -> Self {
        Self(step.rem_euclid(Self::STEPS) as u8)
    }

    #[inline]
    pub const fn step(self) -> i32 {
        self.0 as i32
    }

    /// Nearest grid direction. Odd headings sit between two directions and
    /// resolve clockwise.
    #[inline]
    pub const fn nearest_direction(self) -> Direction {
        Direction::from_index(((self.0 as usize) + 1) / 2)
    }

    /// Clockwise steps from `self` to `other`, `0..16`.
    #[inline]
    pub const fn steps_to(self, other: Heading) -> i32 {
        (other.step() - self.step()).rem_euclid(Self::STEPS)
    }
}

impl From<Direction> for Heading {
    fn from(d: Direction) -> Self {
        d.heading()
    }
}
