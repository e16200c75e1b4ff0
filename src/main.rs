mod app;
mod color;
mod data;
mod state;
mod ui;

use app::LaunchBoardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional positional argument: dataset file to load before the UI starts.
    let startup_dataset = match std::env::args_os().nth(1) {
        Some(path) => match data::loader::load_file(std::path::Path::new(&path)) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.to_string_lossy());
                std::process::exit(1);
            }
        },
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render png/jpg/etc.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let app = match startup_dataset {
                Some(dataset) => LaunchBoardApp::with_dataset(dataset),
                None => LaunchBoardApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
