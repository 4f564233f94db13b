//! Packed vertex keys.
//!
//! A `(x, y, level)` triple packs into a single `u32`:
//!
//! | bits | field |
//! |---|---|
//! | 0–13 | x |
//! | 14–27 | y |
//! | 28–29 | level |
//!
//! Bits 30–31 are never set by [`compress`], so [`NO_PARENT`] cannot collide
//! with a real tile.

use std::fmt;

use crate::geom::Position;

/// Packed `(x, y, level)` triple.
pub type PosKey = u32;

/// Largest x or y that packs losslessly.
pub const MAX_COORD: i32 = (1 << COORD_BITS) - 1;

/// Largest level that packs losslessly.
pub const MAX_LEVEL: i32 = (1 << LEVEL_BITS) - 1;

/// Parent marker for search roots.
pub const NO_PARENT: PosKey = u32::MAX;

const COORD_BITS: u32 = 14;
const LEVEL_BITS: u32 = 2;
const COORD_MASK: u32 = (1 << COORD_BITS) - 1;
const LEVEL_MASK: u32 = (1 << LEVEL_BITS) - 1;
const Y_SHIFT: u32 = COORD_BITS;
const LEVEL_SHIFT: u32 = COORD_BITS * 2;

/// Pack a coordinate triple. Out-of-range values are clamped into range.
#[inline]
pub fn compress(x: i32, y: i32, level: i32) -> PosKey {
    let x = x.clamp(0, MAX_COORD) as u32;
    let y = y.clamp(0, MAX_COORD) as u32;
    let level = level.clamp(0, MAX_LEVEL) as u32;
    (level << LEVEL_SHIFT) | (y << Y_SHIFT) | x
}

#[inline]
pub fn x_of(key: PosKey) -> i32 {
    (key & COORD_MASK) as i32
}

#[inline]
pub fn y_of(key: PosKey) -> i32 {
    ((key >> Y_SHIFT) & COORD_MASK) as i32
}

#[inline]
pub fn level_of(key: PosKey) -> i32 {
    ((key >> LEVEL_SHIFT) & LEVEL_MASK) as i32
}

/// A coordinate that cannot be packed without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordError {
    OutOfRange(Position),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(p) => write!(
                f,
                "position {p} is outside the supported range (0..={MAX_COORD}, level 0..={MAX_LEVEL})"
            ),
        }
    }
}

impl std::error::Error for CoordError {}
