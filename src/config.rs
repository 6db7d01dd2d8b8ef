use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "pin-collector.json";

pub const ENV_DATA_PATH: &str = "PIN_COLLECTOR_DATA_PATH";
pub const ENV_EXPORT_NAME: &str = "PIN_COLLECTOR_EXPORT_NAME";

/// Application settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local copy of the collection, loaded and saved on request.
    pub data_path: PathBuf,
    /// Default file name offered by the export dialog.
    pub export_name: String,
    /// Maximum thumbnail edge in the gallery, in points.
    pub thumbnail_size: f32,
    /// Initial window size.
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/pins.xlsx"),
            export_name: "pins_export.xlsx".to_string(),
            thumbnail_size: 120.0,
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Defaults, then [`CONFIG_FILE`] if present, then environment overrides.
    ///
    /// A broken config file is logged and ignored.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.is_file() {
            match Self::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring config file: {e:#}");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.trim().is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(name) = lookup(ENV_EXPORT_NAME).filter(|v| !v.trim().is_empty()) {
            self.export_name = name;
        }
    }
}
