mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use app::PovertyDashApp;
use eframe::egui;
use poverty_dash::settings::DashboardSettings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut settings = DashboardSettings::from_env().context("loading dashboard settings")?;
    // Optional first argument overrides the configured data file.
    if let Some(path) = std::env::args_os().nth(1) {
        settings.data_path = PathBuf::from(path);
    }
    log::info!("Starting with data file {}", settings.data_path.display());

    let title = settings.window_title.clone();
    let app = PovertyDashApp::new(settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("running dashboard UI: {e}"))
}
