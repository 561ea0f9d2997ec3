//! Configuration IO helpers for place search configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};

use crate::config::{ConfigError, PlacesConfig, interpolate_config, validate_config};

/// Returns the default path for the places configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var("GEOMAP_CONFIG_PATH")
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("geomap").join("places.json")
}

/// Loads and parses places configuration from the default path.
pub fn load_config() -> Result<PlacesConfig, ConfigError> {
    let path = default_config_path();
    load_config_from_path(&path)
}

/// Loads and parses places configuration from a specific path.
///
/// A missing file yields the default configuration.
pub fn load_config_from_path(path: &Path) -> Result<PlacesConfig, ConfigError> {
    if !path.exists() {
        return Ok(PlacesConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let mut config: PlacesConfig = serde_json::from_str(&content)?;
    interpolate_config(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}
