//! Runtime settings.
//!
//! Read from an optional JSON file, then overridden by environment variables:
//! ```json
//! {
//!   "data_path": "flight_cleaned.csv",
//!   "top_routes": 10,
//!   "preview_rows": 5
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::analyzers::routes::DEFAULT_TOP_ROUTES;

pub const CONFIG_PATH_VAR: &str = "FLIGHT_SEGMENTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "flight_segmenter.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File path or URL of the flight CSV.
    pub data_path: String,
    pub top_routes: usize,
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: "flight_cleaned.csv".to_string(),
            top_routes: DEFAULT_TOP_ROUTES,
            preview_rows: 5,
        }
    }
}

impl AppConfig {
    /// Loads the config file named by `FLIGHT_SEGMENTER_CONFIG` (or the
    /// default path) and applies environment overrides. A missing file is
    /// not an error.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Reads a JSON config file, falling back to defaults if it does not exist.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).with_context(|| format!("invalid config file {path}"))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup("FLIGHT_DATA_PATH") {
            self.data_path = path;
        }
        if let Some(top) = lookup("FLIGHT_TOP_ROUTES") {
            self.top_routes = top.parse().context("FLIGHT_TOP_ROUTES must be an integer")?;
        }
        if let Some(rows) = lookup("FLIGHT_PREVIEW_ROWS") {
            self.preview_rows = rows.parse().context("FLIGHT_PREVIEW_ROWS must be an integer")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::from_file(&temp_path("flight_segmenter_no_config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.top_routes, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_path("flight_segmenter_test_config.json");
        fs::write(&path, r#"{ "top_routes": 3 }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.top_routes, 3);
        assert_eq!(config.data_path, "flight_cleaned.csv");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FLIGHT_DATA_PATH", "other.csv"),
            ("FLIGHT_PREVIEW_ROWS", "8"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data_path, "other.csv");
        assert_eq!(config.preview_rows, 8);
        assert_eq!(config.top_routes, 10);
    }

    #[test]
    fn test_bad_override_is_error() {
        let mut config = AppConfig::default();
        assert!(
            config
                .apply_overrides(|name| (name == "FLIGHT_TOP_ROUTES").then(|| "ten".to_string()))
                .is_err()
        );
    }
}
