//! Client settings
//!
//! Persisted as JSON next to the executable, separate from the session
//! catalog. Missing or malformed files fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_DT, MIN_LOADING_FLOOR_SECS, MIN_LOADING_SECS};
use crate::error::{Result, SessionError};

/// Client settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Directory holding the manifest and session documents
    pub content_root: PathBuf,
    /// Shortest time the loading screen stays up (seconds)
    pub min_loading_secs: f32,
    /// Largest frame delta forwarded to the simulation (seconds)
    pub max_frame_dt: f32,
    pub fullscreen: bool,
    /// Text shown while a session loads
    pub loading_message: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("Content"),
            min_loading_secs: MIN_LOADING_SECS,
            max_frame_dt: MAX_FRAME_DT,
            fullscreen: true,
            loading_message: "Loading session config...".to_string(),
        }
    }
}

impl ClientSettings {
    /// Settings file name
    pub const FILE_NAME: &'static str = "swarm_kc_settings.json";

    /// Loading duration with the floor applied
    pub fn effective_min_loading_secs(&self) -> f32 {
        self.min_loading_secs.max(MIN_LOADING_FLOOR_SECS)
    }

    /// Load settings from `path`, or defaults if unreadable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| SessionError::io(path, e))?;
        log::info!("Settings saved");
        Ok(())
    }
}
