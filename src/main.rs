mod app;
mod color;
mod ui;

use app::PinCollectorApp;
use eframe::egui;
use pin_collector::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::info!("local data file: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pin Collector",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and render thumbnails.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PinCollectorApp::new(config)))
        }),
    )
}
