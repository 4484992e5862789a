#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use catalog_core::CatalogOptions;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;

mod app;
mod engine;
mod logger;
mod views;
mod worker;

/// Name of the state file kept next to the catalog when --state is not given
const DEFAULT_STATE_FILE: &str = ".catalog-state.json";

#[derive(Parser)]
#[command(name = "catalog-viewer", about = "Page-flip catalog viewer", version)]
struct Args {
    /// Catalog directory containing the page images
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Viewer configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Query string to open with, e.g. "?pNo=5"
    #[arg(short, long, default_value = "")]
    query: String,

    /// File holding notes, sticky notes and panel state
    #[arg(long)]
    state: Option<PathBuf>,
}

/// Everything the app needs to start a session
pub struct Launch {
    pub root: PathBuf,
    pub options: CatalogOptions,
    pub query: String,
    pub state_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logger = logger::AppLogger::new(500);
    logger.clone().init()?;

    let runtime = tokio::runtime::Runtime::new()?;

    let options = match &args.config {
        Some(path) => runtime.block_on(CatalogOptions::load(path))?,
        None => CatalogOptions::default(),
    };

    let launch = Launch {
        state_path: args
            .state
            .unwrap_or_else(|| args.root.join(DEFAULT_STATE_FILE)),
        root: args.root,
        options,
        query: args.query,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Catalog Viewer"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Catalog Viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::CatalogApp::new(cc, handle, logger, launch)))),
    )
    .map_err(|e| anyhow::anyhow!("Viewer exited with error: {}", e))?;

    Ok(())
}
