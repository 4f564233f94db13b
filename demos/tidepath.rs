//! Print walking and sailing routes over an ASCII chart.
//!
//! Run: cargo run --bin tidepath -- demos/charts/strait.txt [config.json]
//!
//! Set `TIDEPATH_LOG=debug` to see search diagnostics.

use std::path::PathBuf;

use tidepath_demo::{Scene, load_config};
use tidepath_paths::SearchConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("TIDEPATH_LOG", "info"))
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(chart_path) = args.next() else {
        eprintln!("usage: tidepath <chart.txt> [config.json]");
        std::process::exit(2);
    };

    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => SearchConfig::default(),
    };

    match Scene::load(&chart_path) {
        Ok(scene) => print!("{}", scene.report(&config)),
        Err(e) => {
            eprintln!("Error: {}: {e}", chart_path.display());
            std::process::exit(1);
        }
    }
}
