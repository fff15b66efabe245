mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PortfolioPulseApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Pulse – Analytics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(PortfolioPulseApp::new(config)))),
    )
}
