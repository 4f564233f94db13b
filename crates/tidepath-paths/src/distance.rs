use tidepath_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Cheapest 8-directional cost between two points on an open grid: take
/// diagonal steps until one axis is aligned, then orthogonal ones.
#[inline]
pub fn octile(a: Point, b: Point, orthogonal: i32, diagonal: i32) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    diagonal * lo + orthogonal * (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics() {
        let a = Point::new(1, 1);
        let b = Point::new(4, -1);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(octile(a, b, 10, 14), 2 * 14 + 10);
        assert_eq!(octile(a, a, 10, 14), 0);
    }
}
