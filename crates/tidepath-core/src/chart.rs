//! ASCII terrain charts.
//!
//! A [`Chart`] parses text into solid/open tiles and named markers, then
//! stamps them onto a [`CollisionGrid`] level.
//!
//! | glyph | meaning |
//! |---|---|
//! | `#` | solid |
//! | `.` `~` space | open |
//! | `A`–`Z`, `0`–`9` | open, remembered as a marker |

use std::fmt;

use crate::collision::CollisionGrid;
use crate::geom::{Point, Range};

/// A rectangular terrain section built from text.
///
/// Lines are separated by `'\n'` and must all have the same width. Leading
/// and trailing blank lines are ignored; spaces inside lines are open water.
#[derive(Debug, Clone)]
pub struct Chart {
    rows: Vec<Vec<char>>,
    size: Point,
    markers: Vec<(char, Point)>,
}

impl Chart {
    /// Parse a chart.
    pub fn parse(s: &str) -> Result<Self, ChartError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        if s.is_empty() {
            return Err(ChartError::Empty);
        }
        let mut rows: Vec<Vec<char>> = Vec::new();
        let mut markers = Vec::new();
        let mut w: i32 = -1;

        for (y, line) in s.lines().enumerate() {
            let row: Vec<char> = line.chars().collect();
            let x = row.len() as i32;
            if w >= 0 && x != w {
                return Err(ChartError::InconsistentSize {
                    line: y as i32,
                    expected: w,
                    found: x,
                });
            }
            w = x;
            for (x, &ch) in row.iter().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '#' | '.' | '~' | ' ' => {}
                    c if c.is_ascii_uppercase() || c.is_ascii_digit() => markers.push((c, pos)),
                    c => return Err(ChartError::InvalidGlyph { ch: c, pos }),
                }
            }
            rows.push(row);
        }

        let size = Point::new(w.max(0), rows.len() as i32);
        Ok(Self {
            rows,
            size,
            markers,
        })
    }

    /// The (width, height) size of the chart in tiles.
    pub fn size(&self) -> Point {
        self.size
    }

    /// Chart-relative bounds.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size.x, self.size.y)
    }

    /// Glyph at a chart-relative point.
    pub fn glyph(&self, p: Point) -> Option<char> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.rows
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .copied()
    }

    /// Whether the chart-relative point is solid. Outside the chart counts
    /// as solid.
    pub fn is_solid(&self, p: Point) -> bool {
        self.glyph(p).is_none_or(|c| c == '#')
    }

    /// All chart-relative points carrying marker `ch`, in reading order.
    pub fn markers(&self, ch: char) -> Vec<Point> {
        self.markers
            .iter()
            .filter(|(c, _)| *c == ch)
            .map(|&(_, p)| p)
            .collect()
    }

    /// First chart-relative point carrying marker `ch`.
    pub fn marker(&self, ch: char) -> Option<Point> {
        self.markers.iter().find(|(c, _)| *c == ch).map(|&(_, p)| p)
    }

    /// Build a single-level grid whose plane covers exactly this chart.
    pub fn to_grid(&self, level: i32) -> CollisionGrid {
        let mut grid = CollisionGrid::new().with_plane(level, self.bounds());
        self.stamp(&mut grid, Point::ZERO, level);
        grid
    }

    /// Stamp the chart's solid and open tiles onto an existing plane, with
    /// the chart's top-left corner at `origin`. Tiles that fall outside the
    /// plane are dropped.
    pub fn stamp(&self, grid: &mut CollisionGrid, origin: Point, level: i32) {
        for p in self.bounds() {
            let w = p + origin;
            grid.set_solid(w.x, w.y, level, self.is_solid(p));
        }
    }

    /// Render the chart with some tiles replaced by `overlay`.
    pub fn render(&self, overlay: impl Fn(Point) -> Option<char>) -> String {
        let mut out = String::with_capacity(self.bounds().len() + self.rows.len());
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                out.push(overlay(Point::new(x as i32, y as i32)).unwrap_or(ch));
            }
            out.push('\n');
        }
        out
    }
}

/// Errors that can occur when parsing a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// No lines at all.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentSize { line: i32, expected: i32, found: i32 },
    /// A glyph outside the chart alphabet.
    InvalidGlyph { ch: char, pos: Point },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "chart: no content"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "chart: line {line} is {found} wide, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => write!(
                f,
                "chart contains invalid glyph \u{201c}{ch}\u{201d} at ({}, {})",
                pos.x, pos.y
            ),
        }
    }
}

impl std::error::Error for ChartError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionMap;

    const HARBOUR: &str = "
#####
#S..#
#.#.#
#..T#
#####";

    #[test]
    fn parse_and_size() {
        let c = Chart::parse(HARBOUR).unwrap();
        assert_eq!(c.size(), Point::new(5, 5));
        assert_eq!(c.glyph(Point::new(1, 1)), Some('S'));
        assert!(c.is_solid(Point::new(2, 2)));
        assert!(!c.is_solid(Point::new(1, 2)));
        assert!(c.is_solid(Point::new(9, 9)));
    }

    #[test]
    fn markers_are_open_and_found() {
        let c = Chart::parse(HARBOUR).unwrap();
        assert_eq!(c.marker('S'), Some(Point::new(1, 1)));
        assert_eq!(c.marker('T'), Some(Point::new(3, 3)));
        assert_eq!(c.marker('Q'), None);
        assert!(!c.is_solid(Point::new(3, 3)));
    }

    #[test]
    fn to_grid_matches_glyphs() {
        let c = Chart::parse(HARBOUR).unwrap();
        let g = c.to_grid(0);
        assert!(g.is_solid(0, 0, 0));
        assert!(!g.is_solid(1, 1, 0));
        assert!(g.is_solid(2, 2, 0));
        assert!(!g.has_level(1));
    }

    #[test]
    fn stamp_at_origin() {
        let c = Chart::parse("#.\n.#").unwrap();
        let mut g = CollisionGrid::new().with_plane(2, Range::new(0, 0, 10, 10));
        c.stamp(&mut g, Point::new(4, 5), 2);
        assert!(g.is_solid(4, 5, 2));
        assert!(!g.is_solid(5, 5, 2));
        assert!(g.is_solid(5, 6, 2));
        assert!(!g.is_solid(0, 0, 2));
    }

    #[test]
    fn inconsistent_size_error() {
        let err = Chart::parse("##\n###").unwrap_err();
        assert_eq!(
            err,
            ChartError::InconsistentSize {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_glyph_error() {
        let err = Chart::parse("#.\n#?").unwrap_err();
        assert_eq!(
            err,
            ChartError::InvalidGlyph {
                ch: '?',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn empty_chart_error() {
        assert_eq!(Chart::parse("\n\n").unwrap_err(), ChartError::Empty);
    }

    #[test]
    fn render_overlay() {
        let c = Chart::parse("...\n.#.").unwrap();
        let s = c.render(|p| (p == Point::new(0, 0)).then_some('*'));
        assert_eq!(s, "*..\n.#.\n");
    }
}
