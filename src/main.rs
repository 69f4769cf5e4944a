mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SalaryDashboardApp;
use config::{DashboardConfig, MIN_WINDOW_SIZE, WINDOW_SIZE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(DashboardConfig::default())))),
    )
}
