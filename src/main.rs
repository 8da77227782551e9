//! CSV Editor - Drag-and-drop CSV table editor
//!
//! Load a CSV file, edit cells, add or delete rows, and export the result.

mod cli;
mod config;
mod data;
mod gui;
mod logging;

use clap::Parser;
use cli::CliArgs;
use config::EditorConfig;
use data::{DelimiterChoice, LoadOptions};
use eframe::egui;
use gui::CsvEditorApp;

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();

    let load_options = LoadOptions {
        delimiter: args
            .delimiter
            .map(DelimiterChoice::from)
            .unwrap_or(config.delimiter),
    };
    let startup_path = args.path;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([640.0, 400.0])
            .with_drag_and_drop(true)
            .with_title("CSV Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CSV Editor",
        options,
        Box::new(move |cc| {
            Ok(Box::new(CsvEditorApp::new(
                cc,
                config,
                load_options,
                startup_path,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the editor: {e}"))
}
