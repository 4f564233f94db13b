//! Distance from a tile to the nearest solid tile, memoized per search.

use rustc_hash::FxHashMap;
use tidepath_core::{CollisionMap, PosKey, Position};

/// Lazily filled map of obstacle distances.
///
/// Distances are Chebyshev ring indices: a solid tile is at 0, a tile with a
/// solid neighbour at 1. Tiles with nothing solid within `radius` read
/// `radius + 1`.
#[derive(Debug, Clone)]
pub struct ProximityField {
    radius: i32,
    cache: FxHashMap<PosKey, i32>,
}

impl ProximityField {
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.max(0),
            cache: FxHashMap::default(),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Value reported for tiles with no obstacle in range.
    pub fn open_distance(&self) -> i32 {
        self.radius + 1
    }

    /// Distance from `pos` to the nearest solid tile on its level.
    pub fn distance<M: CollisionMap + ?Sized>(&mut self, map: &M, pos: Position) -> i32 {
        let key = pos.key();
        if let Some(&d) = self.cache.get(&key) {
            return d;
        }
        let d = self.scan(map, pos);
        self.cache.insert(key, d);
        d
    }

    fn scan<M: CollisionMap + ?Sized>(&self, map: &M, pos: Position) -> i32 {
        let solid = |dx: i32, dy: i32| {
            let p = pos.shift(dx, dy);
            !p.is_valid() || map.is_solid(p.x, p.y, p.level)
        };
        if solid(0, 0) {
            return 0;
        }
        for r in 1..=self.radius {
            let cardinals = [(0, -r), (r, 0), (0, r), (-r, 0)];
            let corners = [(r, -r), (r, r), (-r, r), (-r, -r)];
            if cardinals.iter().chain(&corners).any(|&(dx, dy)| solid(dx, dy)) {
                return r;
            }
            // Remaining ring tiles, walking out from each cardinal.
            for i in 1..r {
                let ring = [
                    (i, -r),
                    (-i, -r),
                    (r, i),
                    (r, -i),
                    (i, r),
                    (-i, r),
                    (-r, i),
                    (-r, -i),
                ];
                if ring.iter().any(|&(dx, dy)| solid(dx, dy)) {
                    return r;
                }
            }
        }
        self.open_distance()
    }

    /// Number of memoized tiles.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tidepath_core::{CollisionFlags, CollisionGrid, Point, Range};

    /// Records every `is_solid` probe.
    struct Probe<'a> {
        inner: &'a CollisionGrid,
        seen: RefCell<Vec<Point>>,
    }

    impl CollisionMap for Probe<'_> {
        fn flags(&self, x: i32, y: i32, level: i32) -> CollisionFlags {
            self.inner.flags(x, y, level)
        }

        fn has_level(&self, level: i32) -> bool {
            self.inner.has_level(level)
        }

        fn is_solid(&self, x: i32, y: i32, level: i32) -> bool {
            self.seen.borrow_mut().push(Point::new(x, y));
            self.inner.is_solid(x, y, level)
        }
    }

    fn sea(w: i32, h: i32) -> CollisionGrid {
        CollisionGrid::new().with_plane(0, Range::new(0, 0, w, h))
    }

    #[test]
    fn distance_to_nearest_rock() {
        let mut g = sea(30, 30);
        g.set_solid(10, 10, 0, true);
        let mut f = ProximityField::new(8);
        assert_eq!(f.distance(&g, Position::ground(10, 10)), 0);
        assert_eq!(f.distance(&g, Position::ground(11, 10)), 1);
        assert_eq!(f.distance(&g, Position::ground(13, 12)), 3);
        assert_eq!(f.distance(&g, Position::ground(7, 14)), 4);
    }

    #[test]
    fn sentinel_past_radius() {
        let g = sea(40, 40);
        let mut f = ProximityField::new(8);
        assert_eq!(f.open_distance(), 9);
        assert_eq!(f.distance(&g, Position::ground(20, 20)), 9);
        // The plane edge counts as solid.
        assert_eq!(f.distance(&g, Position::ground(2, 20)), 3);
    }

    #[test]
    fn memoized_per_field() {
        let mut g = sea(30, 30);
        g.set_solid(5, 5, 0, true);
        let probe = Probe {
            inner: &g,
            seen: RefCell::new(Vec::new()),
        };
        let mut f = ProximityField::new(4);
        let d = f.distance(&probe, Position::ground(7, 5));
        let probes = probe.seen.borrow().len();
        assert_eq!(f.distance(&probe, Position::ground(7, 5)), d);
        assert_eq!(probe.seen.borrow().len(), probes);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn ring_scans_cardinals_then_corners() {
        let g = sea(30, 30);
        let probe = Probe {
            inner: &g,
            seen: RefCell::new(Vec::new()),
        };
        let mut f = ProximityField::new(2);
        assert_eq!(f.distance(&probe, Position::ground(10, 10)), 3);

        let seen = probe.seen.borrow();
        let c = Point::new(10, 10);
        let at = |dx, dy| seen.iter().position(|&p| p == c.shift(dx, dy));
        assert_eq!(seen[0], c);
        // Ring 1 is all cardinals and corners.
        assert_eq!(&seen[1..5], &[c.shift(0, -1), c.shift(1, 0), c.shift(0, 1), c.shift(-1, 0)]);
        assert_eq!(&seen[5..9], &[c.shift(1, -1), c.shift(1, 1), c.shift(-1, 1), c.shift(-1, -1)]);
        // Ring 2: cardinals, corners, then the rest.
        assert!(at(0, -2) < at(2, -2));
        assert!(at(-2, 0) < at(2, 2));
        assert!(at(-2, -2) < at(1, -2));
        assert!(at(-2, -2) < at(-2, 1));
        assert_eq!(seen.len(), 1 + 8 + 16);
    }
}
