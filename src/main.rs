mod app;
mod config;
mod data;
mod error;
mod gui;
mod log;
mod pipeline;

use app::RelaxApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    ::log::info!(
        "Starting Relaxometry Processing GUI v{}",
        env!("CARGO_PKG_VERSION")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Relaxometry Processing")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Relaxometry Processing GUI",
        options,
        Box::new(|cc| Ok(Box::new(RelaxApp::new(cc)))),
    )
}
