mod app;
mod color;
mod ui;

use std::path::Path;

use app::BikeShareApp;
use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::data::loader::load_datasets;
use bikeshare_dashboard::state::AppState;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new("."));
    let state = AppState::from_load(load_datasets(&config.data_dir, &config.data_files()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(BikeShareApp::new(state)))),
    )
}
