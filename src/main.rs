mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::RidershipApp;
use config::Config;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("reading configuration")?;
    log::info!("Using dataset source {:?}", config.source);
    let source = config.into_source();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Public Transport Tracker",
        options,
        Box::new(|cc| Ok(Box::new(RidershipApp::new(&cc.egui_ctx, source)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
