mod app;
mod config;
mod engine;
mod network;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{EngineConfig, LayoutMode, load_config};
use crate::network::GraphSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Network JSON file; the bundled demo network is shown when omitted.
    #[arg(long)]
    network: Option<PathBuf>,

    /// TOML file overriding layout and interaction tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    layout: Option<LayoutMode>,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let mut config = match &self.config {
            Some(path) => load_config(path).unwrap_or_else(|error| {
                log::error!("{error:#}; using default settings");
                EngineConfig::default()
            }),
            None => EngineConfig::default(),
        };
        if let Some(layout) = self.layout {
            config.layout_mode = layout;
        }
        config
    }

    fn source(&self) -> GraphSource {
        self.network
            .clone()
            .map_or(GraphSource::Demo, GraphSource::File)
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.engine_config();
    let source = args.source();
    log::info!("starting with {} layout, source: {source}", config.layout_mode.label());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "trust-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::TrustGraphApp::new(cc, source, config)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_flag_overrides_config() {
        let args = Args::parse_from(["trust-graph", "--layout", "relaxation"]);
        assert_eq!(args.engine_config().layout_mode, LayoutMode::Relaxation);
        assert_eq!(args.source(), GraphSource::Demo);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let args = Args::parse_from(["trust-graph", "--config", "/nonexistent/trust.toml"]);
        assert_eq!(args.engine_config(), EngineConfig::default());
    }

    #[test]
    fn network_flag_selects_a_file() {
        let args = Args::parse_from(["trust-graph", "--network", "people.json"]);
        assert_eq!(args.source(), GraphSource::File(PathBuf::from("people.json")));
    }
}
