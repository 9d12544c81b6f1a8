use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{DataFiles, DAY_FILE, HOUR_FILE};

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "bikeshare.toml";

/// Dashboard configuration. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the two CSV files.
    pub data_dir: PathBuf,
    pub day_file: String,
    pub hour_file: String,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Bike Sharing Dataset"),
            day_file: DAY_FILE.to_string(),
            hour_file: HOUR_FILE.to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `bikeshare.toml` from `dir` if present. A missing file gives the
    /// defaults; an invalid one is reported and also falls back to defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            day: self.day_file.clone(),
            hour: self.hour_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            data_dir = "/srv/bikes"

            [window]
            width = 800.0
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/bikes"));
        assert_eq!(config.day_file, "day.csv");
        assert_eq!(config.hour_file, "hour.csv");
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 900.0);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            DashboardConfig::load_or_default(dir.path()),
            DashboardConfig::default()
        );
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "data_dir = [").unwrap();
        assert!(DashboardConfig::from_file(&dir.path().join(CONFIG_FILE)).is_err());
        assert_eq!(
            DashboardConfig::load_or_default(dir.path()),
            DashboardConfig::default()
        );
    }
}
