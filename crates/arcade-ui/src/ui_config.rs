use arcade_core::{grid::DEFAULT_COLUMNS, zoom::ZoomTiming};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR: &str = "arcade-launcher";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Root that relative cover paths and the default catalog/background are
    /// resolved against. Defaults to the working directory.
    pub base_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub background_path: Option<PathBuf>,
    pub columns: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub fullscreen: bool,
    pub debounce_ms: u64,
    pub zoom_in_ms: u64,
    pub zoom_out_ms: u64,
    pub overlay_grow: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        let timing = ZoomTiming::default();
        Self {
            base_dir: None,
            catalog_path: None,
            background_path: None,
            columns: DEFAULT_COLUMNS,
            window_width: 1280.0,
            window_height: 720.0,
            fullscreen: false,
            debounce_ms: timing.debounce.as_millis() as u64,
            zoom_in_ms: timing.zoom_in.as_millis() as u64,
            zoom_out_ms: timing.zoom_out.as_millis() as u64,
            overlay_grow: timing.grow,
        }
    }
}

impl UiConfig {
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.base_dir().join("data").join("games.json"))
    }

    pub fn background_path(&self) -> PathBuf {
        self.background_path
            .clone()
            .unwrap_or_else(|| self.base_dir().join("assets").join("background.gif"))
    }

    pub fn zoom_timing(&self) -> ZoomTiming {
        ZoomTiming {
            debounce: Duration::from_millis(self.debounce_ms),
            zoom_in: Duration::from_millis(self.zoom_in_ms),
            zoom_out: Duration::from_millis(self.zoom_out_ms),
            grow: self.overlay_grow.max(1.0),
            ..ZoomTiming::default()
        }
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR);
        }
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }

    PathBuf::new()
}

pub fn default_ui_config_path() -> PathBuf {
    config_dir().join("ui.toml")
}

pub fn load_from_file(path: &Path) -> UiConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return UiConfig::default(),
    };

    match toml::from_str::<UiConfig>(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(
                "Failed to parse UI config {}: {e}; using defaults",
                path.display()
            );
            UiConfig::default()
        }
    }
}

pub fn save_to_file(path: &Path, cfg: &UiConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let text = toml::to_string_pretty(cfg).map_err(std::io::Error::other)?;
    std::fs::write(path, text)
}
