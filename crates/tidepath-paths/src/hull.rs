//! Multi-tile footprints and their rotations.

use tidepath_core::{CollisionMap, Direction, Heading, Point, Position};

/// Fixed-point scale of the rotation tables.
const SCALE: i32 = 10_000;

/// `cos` and `sin` of `k * π/4`, scaled by [`SCALE`]. Headings grow
/// clockwise and y grows downward, so the usual formulas rotate clockwise on
/// screen.
const COS: [i32; 8] = [10_000, 7_071, 0, -7_071, -10_000, -7_071, 0, 7_071];
const SIN: [i32; 8] = [0, 7_071, 10_000, 7_071, 0, -7_071, -10_000, -7_071];

/// Divide by [`SCALE`], rounding half away from zero.
#[inline]
fn descale(n: i32) -> i32 {
    (n + n.signum() * SCALE / 2) / SCALE
}

fn rotate(p: Point, eighths: usize) -> Point {
    let (c, s) = (COS[eighths % 8], SIN[eighths % 8]);
    Point::new(descale(p.x * c - p.y * s), descale(p.x * s + p.y * c))
}

/// The tiles a vessel occupies, relative to its anchor, for every travel
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HullProfile {
    offsets: Vec<Point>,
    heading: Direction,
    rotated: [Vec<Point>; 8],
}

impl HullProfile {
    /// Build a profile from offsets captured while the vessel faces
    /// `heading`. The anchor `(0, 0)` is added if missing.
    pub fn new(offsets: impl IntoIterator<Item = Point>, heading: Heading) -> Self {
        let mut offsets: Vec<Point> = offsets.into_iter().collect();
        if !offsets.contains(&Point::ZERO) {
            offsets.insert(0, Point::ZERO);
        }
        let heading = heading.nearest_direction();
        let rotated = std::array::from_fn(|i| {
            let dir = Direction::from_index(i);
            let eighths = (heading.heading().steps_to(dir.heading()) / 2) as usize;
            let mut out: Vec<Point> = Vec::with_capacity(offsets.len());
            for &p in &offsets {
                let q = rotate(p, eighths);
                if !out.contains(&q) {
                    out.push(q);
                }
            }
            out
        });
        Self {
            offsets,
            heading,
            rotated,
        }
    }

    /// A one-tile hull: behaves like a walker that cannot use transports.
    pub fn single_tile() -> Self {
        Self::new([Point::ZERO], Heading::default())
    }

    /// Offsets as captured, anchor included.
    pub fn offsets(&self) -> &[Point] {
        &self.offsets
    }

    /// Direction the captured offsets face.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Offsets when travelling in `dir`.
    pub fn footprint(&self, dir: Direction) -> &[Point] {
        &self.rotated[dir.index()]
    }

    /// Absolute tiles covered with the anchor at `anchor`, travelling in
    /// `dir`.
    pub fn tiles(&self, anchor: Position, dir: Direction) -> impl Iterator<Item = Position> + '_ {
        self.footprint(dir).iter().map(move |&d| anchor.offset(d))
    }

    /// Whether no covered tile is solid.
    pub fn fits<M>(&self, map: &M, anchor: Position, dir: Direction) -> bool
    where
        M: CollisionMap + ?Sized,
    {
        self.tiles(anchor, dir).all(|t| t.is_valid() && !map.is_solid(t.x, t.y, t.level))
    }
}
