//! File-backed config source
//!
//! Layout under the content root:
//! - `manifest.json`: ordered entries, completion flags, active index
//! - one JSON session document per entry, path relative to the root

use std::fs;
use std::path::{Path, PathBuf};

use super::manifest::{ConfigManifest, ManifestEntry};
use super::service::ConfigSource;
use crate::error::{Result, SessionError};

/// Manifest file name inside the content root
pub const MANIFEST_FILE: &str = "manifest.json";

/// Reads session documents and the manifest from disk
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource;

impl FileConfigSource {
    pub fn new() -> Self {
        Self
    }

    fn manifest_path(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }
}

impl ConfigSource for FileConfigSource {
    fn load_config_json(&self, root: &Path) -> Result<String> {
        let manifest = self.load_manifest(root)?;
        if manifest.is_empty() {
            log::warn!("Manifest under {} has no entries", root.display());
            return Ok(String::new());
        }
        let index = self.select_entry_index(&manifest);
        let entry = manifest.entry(index)?;
        log::info!("Active session config: [{}] {}", index, entry.file);
        self.read_entry(root, entry)
    }

    fn load_manifest(&self, root: &Path) -> Result<ConfigManifest> {
        let path = Self::manifest_path(root);
        if !path.exists() {
            log::warn!("No manifest at {}, using an empty one", path.display());
            return Ok(ConfigManifest::default());
        }
        let json = fs::read_to_string(&path).map_err(|e| SessionError::io(&path, e))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save_manifest(&self, root: &Path, manifest: &ConfigManifest) -> Result<()> {
        let path = Self::manifest_path(root);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(manifest)?;

        // Write then rename so a crash never leaves a half-written manifest
        fs::write(&tmp, json).map_err(|e| SessionError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| SessionError::io(&path, e))?;
        log::debug!("Manifest saved to {}", path.display());
        Ok(())
    }

    fn select_entry_index(&self, manifest: &ConfigManifest) -> usize {
        manifest
            .valid_active_index()
            .or_else(|| manifest.entries.iter().position(|e| !e.completed))
            .unwrap_or(0)
    }

    fn read_entry(&self, root: &Path, entry: &ManifestEntry) -> Result<String> {
        let path = root.join(&entry.file);
        fs::read_to_string(&path).map_err(|e| SessionError::io(path, e))
    }
}
