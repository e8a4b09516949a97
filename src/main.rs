mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use app::RestaurantExplorerApp;
use clap::Parser;
use config::Cli;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let path = match cli.data {
        Some(path) => path,
        None => pick_dataset().context("no dataset selected")?,
    };

    let dataset = match data::loader::load_file(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            return Err(e.context(format!("loading {}", path.display())));
        }
    };
    if dataset.is_empty() {
        log::warn!("{} holds no restaurants", path.display());
    }
    log::info!(
        "Loaded {} restaurants from {} with {:?}",
        dataset.len(),
        path.display(),
        dataset.schema()
    );

    let state = AppState::new(Arc::new(dataset), cli.page, cli.currency);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Restaurant Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RestaurantExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the viewer: {e}"))
}

/// Ask for a listing file with the native dialog.
fn pick_dataset() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open restaurant listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}
