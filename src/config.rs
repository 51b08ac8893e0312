//! Sync configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::time::constants::DEFAULT_FRAME_STEP_MS;

/// Error type for loading a config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Added after an item's end when fitting the visible window, so the
    /// end-of-track marker is not clipped at the boundary
    pub window_padding_ms: f64,
    /// Animate window changes
    pub animate_window: bool,
    /// Tag name of the progress element inside a video container
    pub progress_selector: String,
    /// Attribute carrying the normalized playback position
    pub progress_attribute: String,
    /// Rounding step for frame to timestamp conversion
    pub frame_step_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            window_padding_ms: 20.0,
            animate_window: false,
            progress_selector: "progress".to_string(),
            progress_attribute: "value".to_string(),
            frame_step_ms: DEFAULT_FRAME_STEP_MS,
        }
    }
}

impl SyncConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
