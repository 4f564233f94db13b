//! Shared code for the tidepath demo: chart scenes, config loading and the
//! text report.
//!
//! Chart markers: `S` walker start, `V` vessel start, `T` target. A digit
//! that appears exactly twice is a ferry running both ways between its two
//! tiles.

use std::fmt::{self, Write as _};
use std::path::Path;

use tidepath_core::{Chart, ChartError, CollisionGrid, Direction, Point, Position};
use tidepath_nav::{HullSnapshot, Navigator};
use tidepath_paths::{CostShaping, Route, SailOutcome, SearchConfig, Target, Transport, WalkRequest};

/// Fallback vessel: three tiles abreast, two deep.
pub fn barge() -> HullSnapshot {
    HullSnapshot {
        offsets: [(-1, 0), (0, 0), (1, 0), (-1, 1), (0, 1), (1, 1)]
            .map(|(x, y)| Point::new(x, y))
            .to_vec(),
        heading: Direction::North.heading(),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DemoError {
    Io(std::io::Error),
    Chart(ChartError),
    Config(serde_json::Error),
    /// A required marker glyph is missing from the chart.
    MissingMarker(char),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read failed: {e}"),
            Self::Chart(e) => write!(f, "bad chart: {e}"),
            Self::Config(e) => write!(f, "bad config: {e}"),
            Self::MissingMarker(c) => write!(f, "chart has no '{c}' marker"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Chart(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::MissingMarker(_) => None,
        }
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ChartError> for DemoError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

/// Read a [`SearchConfig`] from a JSON file. Missing fields keep their
/// defaults.
pub fn load_config(path: &Path) -> Result<SearchConfig, DemoError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A parsed chart with its markers resolved.
pub struct Scene {
    pub chart: Chart,
    pub grid: CollisionGrid,
    pub walker: Position,
    pub vessel: Position,
    pub target: Position,
    pub ferries: Vec<Transport>,
}

impl Scene {
    pub fn parse(text: &str) -> Result<Self, DemoError> {
        let chart = Chart::parse(text)?;
        let marker = |c: char| {
            chart
                .marker(c)
                .map(Position::from)
                .ok_or(DemoError::MissingMarker(c))
        };
        let walker = marker('S')?;
        let target = marker('T')?;
        let vessel = marker('V').unwrap_or(walker);

        let mut ferries = Vec::new();
        for d in '0'..='9' {
            if let [a, b] = chart.markers(d).as_slice() {
                let (a, b) = (Position::from(*a), Position::from(*b));
                let label = format!("ferry {d}");
                ferries.push(Transport::new(a, b, 5).labelled(label.clone()));
                ferries.push(Transport::new(b, a, 5).labelled(label));
            }
        }

        Ok(Self {
            grid: chart.to_grid(0),
            chart,
            walker,
            vessel,
            target,
            ferries,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DemoError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Walk from `S` to `T`, using ferries.
    pub fn walk(&self, config: &SearchConfig) -> Route {
        let mut nav = Navigator::with_config(&self.grid, config.clone());
        nav.refresh_transports(&self.ferries);
        match WalkRequest::new(self.walker, Target::Point(self.target)) {
            Ok(req) => nav.walk(&req),
            Err(e) => {
                log::warn!("walk skipped: {e}");
                Route::default()
            }
        }
    }

    /// Sail the demo barge from `V` to `T`.
    pub fn sail(&self, config: &SearchConfig, shaping: &CostShaping) -> SailOutcome {
        let nav = Navigator::with_config(&self.grid, config.clone());
        nav.sail(&barge(), self.vessel, self.target, shaping)
    }

    fn draw(&self, path: &[Position], mark: char) -> String {
        self.chart.render(|p| {
            let pos = Position::from(p);
            if pos == self.target {
                None
            } else if path.contains(&pos) {
                Some(mark)
            } else {
                None
            }
        })
    }

    /// Human-readable summary of both searches.
    pub fn report(&self, config: &SearchConfig) -> String {
        let mut out = String::new();

        let route = self.walk(config);
        let _ = writeln!(out, "walk {} -> {}", self.walker, self.target);
        if route.is_empty() {
            let _ = writeln!(out, "  no route ({} expanded)", route.stats.expanded);
        } else {
            let _ = writeln!(
                out,
                "  {} steps, cost {}, {} expanded",
                route.steps().len(),
                route.cost,
                route.stats.expanded
            );
            for hop in &route.hops {
                let _ = writeln!(out, "  {} to {}", hop.transport.label, route.path[hop.index]);
            }
            out.push_str(&self.draw(&route.path, '*'));
        }

        for (name, shaping) in [
            ("uniform", CostShaping::Uniform),
            ("proximity", CostShaping::proximity()),
        ] {
            let sail = self.sail(config, &shaping);
            let _ = writeln!(out, "sail ({name}) {} -> {}", self.vessel, self.target);
            if sail.is_empty() {
                let _ = writeln!(out, "  no route ({} expanded)", sail.stats.expanded);
            } else {
                let _ = writeln!(
                    out,
                    "  {} tiles, cost {}, {} expanded",
                    sail.path.len(),
                    sail.cost,
                    sail.stats.expanded
                );
                out.push_str(&self.draw(&sail.path, 'o'));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRAIT: &str = include_str!("../charts/strait.txt");

    #[test]
    fn strait_markers_and_ferries() {
        let scene = Scene::parse(STRAIT).unwrap();
        assert_eq!(scene.walker, Position::ground(1, 1));
        assert_eq!(scene.vessel, Position::ground(12, 2));
        assert_eq!(scene.target, Position::ground(26, 13));
        assert_eq!(scene.ferries.len(), 2);
        assert_eq!(scene.ferries[0].label, "ferry 1");
    }

    #[test]
    fn both_agents_reach_the_target() {
        let scene = Scene::parse(STRAIT).unwrap();
        let cfg = SearchConfig::default();
        let walk = scene.walk(&cfg);
        assert_eq!(walk.end(), Some(scene.target));
        let sail = scene.sail(&cfg, &CostShaping::proximity());
        assert_eq!(sail.path.last(), Some(&scene.target));
    }

    #[test]
    fn report_mentions_every_search() {
        let scene = Scene::parse(STRAIT).unwrap();
        let text = scene.report(&SearchConfig::default());
        assert!(text.starts_with("walk "));
        assert!(text.contains("sail (uniform)"));
        assert!(text.contains("sail (proximity)"));
        assert!(text.contains('*'));
        assert!(text.contains("tiles, cost"));
    }

    #[test]
    fn missing_target_is_an_error() {
        let err = Scene::parse("#S.#").err();
        assert!(matches!(err, Some(DemoError::MissingMarker('T'))));
    }

    #[test]
    fn partial_config_json() {
        let cfg: SearchConfig = serde_json::from_str(r#"{ "level_penalty": 50 }"#).unwrap();
        assert_eq!(cfg.level_penalty, 50);
        assert_eq!(cfg.max_expanded, SearchConfig::default().max_expanded);
    }
}
