#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export the surface the binary and integration tests use
pub use engine::{ChartEngine, ChartFrame, RenderModel, StreamEvent};
pub use models::CandleSeries;
pub use ui::ReplayApp;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON-lines event file to stream instead of generated data
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Symbols to generate synthetic sessions for
    #[arg(long, value_delimiter = ',', default_values_t = [
        "BTCUSDT".to_string(),
        "ETHUSDT".to_string(),
        "SOLUSDT".to_string(),
    ])]
    pub symbols: Vec<String>,

    /// Candle interval in milliseconds for synthetic sessions
    #[arg(long)]
    pub interval_ms: Option<i64>,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> ReplayApp {
    ReplayApp::new(cc, args)
}
