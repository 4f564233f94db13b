//! Directional collision data.
//!
//! [`CollisionMap`] is the read-only view every search goes through.
//! [`CollisionGrid`] is an in-memory implementation built from per-level
//! planes of solid tiles and thin walls.

use std::ops::BitOr;

use crate::coord::MAX_LEVEL;
use crate::direction::Direction;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// CollisionFlags
// ---------------------------------------------------------------------------

/// Bitmask of blocked moves out of a tile, one bit per [`Direction`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionFlags(pub u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    pub const FULL: Self = Self(0xFF);

    #[inline]
    pub const fn of(dir: Direction) -> Self {
        Self(dir.bit())
    }

    /// Whether moving in `dir` is blocked.
    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// No direction blocked.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Every direction blocked.
    #[inline]
    pub const fn is_full(self) -> bool {
        self.0 == 0xFF
    }

    #[inline]
    pub const fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.bit())
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// CollisionMap
// ---------------------------------------------------------------------------

/// Read-only directional blocking queries.
///
/// Levels without data read as [`CollisionFlags::FULL`]: nothing on them is
/// walkable.
pub trait CollisionMap {
    /// Blocked moves out of `(x, y)` on `level`.
    fn flags(&self, x: i32, y: i32, level: i32) -> CollisionFlags;

    /// Whether any terrain data exists for `level`.
    fn has_level(&self, level: i32) -> bool;

    /// Every move out of the tile is allowed.
    #[inline]
    fn is_open(&self, x: i32, y: i32, level: i32) -> bool {
        self.flags(x, y, level).is_empty()
    }

    /// Whether moving one step in `dir` from the tile is blocked.
    #[inline]
    fn is_blocked(&self, x: i32, y: i32, level: i32, dir: Direction) -> bool {
        self.flags(x, y, level).contains(dir)
    }

    /// Whether the tile itself cannot be occupied.
    ///
    /// The default treats a tile with every move blocked as solid;
    /// providers that know better should override it.
    #[inline]
    fn is_solid(&self, x: i32, y: i32, level: i32) -> bool {
        self.flags(x, y, level).is_full()
    }
}

impl<T: CollisionMap + ?Sized> CollisionMap for &T {
    #[inline]
    fn flags(&self, x: i32, y: i32, level: i32) -> CollisionFlags {
        (**self).flags(x, y, level)
    }

    #[inline]
    fn has_level(&self, level: i32) -> bool {
        (**self).has_level(level)
    }

    #[inline]
    fn is_solid(&self, x: i32, y: i32, level: i32) -> bool {
        (**self).is_solid(x, y, level)
    }
}

// ---------------------------------------------------------------------------
// CollisionGrid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Plane {
    bounds: Range,
    solid: Vec<bool>,
    /// Per-tile thin walls, one bit per direction.
    walls: Vec<u8>,
}

impl Plane {
    fn new(bounds: Range) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            solid: vec![false; len],
            walls: vec![0; len],
        }
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }

    #[inline]
    fn open(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| !self.solid[i])
    }

    #[inline]
    fn wall(&self, p: Point, dir: Direction) -> bool {
        self.index(p).is_some_and(|i| self.walls[i] & dir.bit() != 0)
    }

    /// One step in `dir` from an open tile.
    fn can_step(&self, p: Point, dir: Direction) -> bool {
        let to = p + dir.delta();
        if !self.open(to) || self.wall(p, dir) || self.wall(to, dir.opposite()) {
            return false;
        }
        if !dir.is_diagonal() {
            return true;
        }
        // No corner cutting: both orthogonal legs must be walkable in
        // either order.
        let (a, b) = dir.components();
        let via_a = p + a.delta();
        let via_b = p + b.delta();
        self.can_step(p, a)
            && self.can_step(p, b)
            && self.can_step(via_a, b)
            && self.can_step(via_b, a)
    }
}

/// In-memory collision data, one rectangular plane per level.
///
/// Tiles outside a plane's bounds are solid. Cloning copies the data, so a
/// grid can be snapshotted and handed to a worker thread.
#[derive(Debug, Clone, Default)]
pub struct CollisionGrid {
    planes: Vec<Option<Plane>>,
}

impl CollisionGrid {
    /// An empty grid with no levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an all-open plane covering `bounds` on `level`.
    /// Levels outside `0..=MAX_LEVEL` are ignored.
    pub fn add_plane(&mut self, level: i32, bounds: Range) {
        if !(0..=MAX_LEVEL).contains(&level) {
            return;
        }
        let li = level as usize;
        if self.planes.len() <= li {
            self.planes.resize(li + 1, None);
        }
        self.planes[li] = Some(Plane::new(bounds));
    }

    /// Builder form of [`CollisionGrid::add_plane`].
    pub fn with_plane(mut self, level: i32, bounds: Range) -> Self {
        self.add_plane(level, bounds);
        self
    }

    /// Bounds of the plane on `level`, if any.
    pub fn bounds(&self, level: i32) -> Option<Range> {
        self.plane(level).map(|p| p.bounds)
    }

    /// Mark a tile solid or open. Does nothing outside the plane.
    pub fn set_solid(&mut self, x: i32, y: i32, level: i32, solid: bool) {
        if let Some(plane) = self.plane_mut(level) {
            if let Some(i) = plane.index(Point::new(x, y)) {
                plane.solid[i] = solid;
            }
        }
    }

    /// Mark every tile of `rng` solid.
    pub fn fill_solid(&mut self, rng: Range, level: i32) {
        for p in rng {
            self.set_solid(p.x, p.y, level, true);
        }
    }

    /// Put a thin wall on the edge of `(x, y)` facing `dir`. The wall blocks
    /// movement across that edge in both directions.
    pub fn add_wall(&mut self, x: i32, y: i32, level: i32, dir: Direction) {
        let Some(plane) = self.plane_mut(level) else {
            return;
        };
        let p = Point::new(x, y);
        if let Some(i) = plane.index(p) {
            plane.walls[i] |= dir.bit();
        }
        if let Some(i) = plane.index(p + dir.delta()) {
            plane.walls[i] |= dir.opposite().bit();
        }
    }

    fn plane(&self, level: i32) -> Option<&Plane> {
        if level < 0 {
            return None;
        }
        self.planes.get(level as usize).and_then(Option::as_ref)
    }

    fn plane_mut(&mut self, level: i32) -> Option<&mut Plane> {
        if level < 0 {
            return None;
        }
        self.planes.get_mut(level as usize).and_then(Option::as_mut)
    }
}

impl CollisionMap for CollisionGrid {
    fn flags(&self, x: i32, y: i32, level: i32) -> CollisionFlags {
        let Some(plane) = self.plane(level) else {
            return CollisionFlags::FULL;
        };
        let p = Point::new(x, y);
        if !plane.open(p) {
            return CollisionFlags::FULL;
        }
        let mut flags = CollisionFlags::NONE;
        for dir in Direction::ALL {
            if !plane.can_step(p, dir) {
                flags = flags.with(dir);
            }
        }
        flags
    }

    fn has_level(&self, level: i32) -> bool {
        self.plane(level).is_some()
    }

    fn is_solid(&self, x: i32, y: i32, level: i32) -> bool {
        self.plane(level)
            .is_none_or(|plane| !plane.open(Point::new(x, y)))
    }
}
