mod app;
mod config;
mod data;
mod analysis;
mod ui;

use std::path::PathBuf;

use anyhow::Context;

use app::ZigfridApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DATA_DIR));

    let store = data::loader::load_store(&data_dir)
        .with_context(|| format!("Could not load price data from '{}'", data_dir.display()))?;

    let zigfrid = ZigfridApp::new(store);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Crypto Zigfrid",
        options,
        Box::new(move |_cc| Ok(Box::new(zigfrid))),
    )
    .map_err(|e| anyhow::anyhow!("Window system error: {e}"))
}
