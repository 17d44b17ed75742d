#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod background;
mod covers;
#[cfg(not(target_os = "android"))]
mod gamepad;
mod keybinds;
mod ui;
mod ui_config;

use clap::Parser;
use eframe::egui;
use keybinds::{KeyBindings, default_keybinds_path};
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Cover-grid launcher for games and emulators")]
struct Args {
    /// Path to the games.json list
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory that cover images and assets are resolved against
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Number of tiles per grid row
    #[arg(long)]
    columns: Option<usize>,

    /// Path to ui.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to keybinds.toml
    #[arg(long)]
    keybinds: Option<PathBuf>,

    /// Start fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Write the effective configuration and keybinds, then exit
    #[arg(long)]
    write_config: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

fn main() -> Result<(), eframe::Error> {
    let args = Args::parse();
    init_logging(args.debug);

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(ui_config::default_ui_config_path);
    let mut config = ui_config::load_from_file(&config_path);
    if args.base_dir.is_some() {
        config.base_dir = args.base_dir;
    }
    if args.catalog.is_some() {
        config.catalog_path = args.catalog;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if args.fullscreen {
        config.fullscreen = true;
    }

    let keybinds_path = args.keybinds.unwrap_or_else(default_keybinds_path);
    let keybinds = KeyBindings::load_from_file(&keybinds_path);

    if args.write_config {
        if let Err(e) = ui_config::save_to_file(&config_path, &config) {
            error!("Failed to write {}: {e}", config_path.display());
        } else {
            info!("Wrote {}", config_path.display());
        }
        if let Err(e) = keybinds.save_to_file(&keybinds_path) {
            error!("Failed to write {}: {e}", keybinds_path.display());
        }
        return Ok(());
    }

    info!(
        "Starting launcher (catalog {}, {} columns)",
        config.catalog_path().display(),
        config.columns
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Arcade Launcher")
            .with_inner_size([config.window_width, config.window_height])
            .with_fullscreen(config.fullscreen),
        ..Default::default()
    };

    eframe::run_native(
        "Arcade Launcher",
        options,
        Box::new(move |cc| Ok(Box::new(app::LauncherApp::new(cc, config, keybinds)))),
    )
}
