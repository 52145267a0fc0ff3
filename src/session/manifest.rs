//! Catalog of session configurations
//!
//! Persisted whole by the config source; the controller reads, mutates in
//! memory and writes it back.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// One selectable session document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Path relative to the content root
    #[serde(alias = "File")]
    pub file: String,
    #[serde(default, alias = "Completed")]
    pub completed: bool,
}

impl ManifestEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            completed: false,
        }
    }
}

/// Ordered entries plus an optional active pointer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigManifest {
    #[serde(default, alias = "Entries")]
    pub entries: Vec<ManifestEntry>,
    #[serde(default, alias = "ActiveIndex")]
    pub active_index: Option<usize>,
}

impl ConfigManifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            entries,
            active_index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active index, if present and in range
    pub fn valid_active_index(&self) -> Option<usize> {
        self.active_index.filter(|&i| i < self.entries.len())
    }

    /// Clear every completion flag and the active pointer
    pub fn reset_progress(&mut self) {
        self.active_index = None;
        for entry in &mut self.entries {
            entry.completed = false;
        }
    }

    /// Entry at `index` with a usable file path
    pub fn entry(&self, index: usize) -> Result<&ManifestEntry> {
        let entry = self
            .entries
            .get(index)
            .ok_or_else(|| SessionError::ManifestEntryInvalid {
                index,
                reason: format!("out of range for {} entries", self.entries.len()),
            })?;
        if entry.file.trim().is_empty() {
            return Err(SessionError::ManifestEntryInvalid {
                index,
                reason: "missing file path".to_string(),
            });
        }
        Ok(entry)
    }
}

/// Step `current` by `delta`, wrapping into [0, count)
pub fn wrap_index(current: usize, delta: isize, count: usize) -> usize {
    debug_assert!(count > 0);
    (current as isize + delta).rem_euclid(count as isize) as usize
}
