//! Configuration loading from file system

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::PickerConfig;
use crate::error::{AssetsPlusError, Result};

/// Load configuration from ~/.assets-plus/config.json
///
/// Returns PickerConfig::default() if the file is missing or invalid.
#[instrument(name = "load_config")]
pub fn load_config() -> PickerConfig {
    let config_path = PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref());
    load_config_from(&config_path)
}

/// Load configuration from an explicit path, falling back to defaults.
pub fn load_config_from(config_path: &Path) -> PickerConfig {
    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return PickerConfig::default();
    }

    match read_config(config_path) {
        Ok(config) => {
            info!(
                path = %config_path.display(),
                window_size = config.window_size,
                video = config.capabilities.video,
                full_features = config.capabilities.full_features,
                "Successfully loaded config"
            );
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to load config, using defaults"
            );
            PickerConfig::default()
        }
    }
}

fn read_config(config_path: &Path) -> Result<PickerConfig> {
    let contents = std::fs::read_to_string(config_path).map_err(|source| AssetsPlusError::Io {
        path: config_path.display().to_string(),
        source,
    })?;
    serde_json::from_str::<PickerConfig>(contents.trim())
        .map_err(|e| AssetsPlusError::Config(e.to_string()))
}
