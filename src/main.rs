mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod reactive;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().context("loading configuration")?;

    // The table is loaded once, before any window exists; a bad file aborts.
    let dataset = data::loader::load_file(&config.data.path).map_err(|e| {
        log::error!("Failed to load {}: {e:#}", config.data.path.display());
        e
    })?;
    log::info!(
        "Loaded {} launches from {} ({} sites, payload {})",
        dataset.len(),
        config.data.path.display(),
        dataset.sites().len(),
        dataset
            .payload_bounds()
            .map(|b| b.to_string())
            .unwrap_or_default(),
    );

    let state = AppState::new(Arc::new(dataset), &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
