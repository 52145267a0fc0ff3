//! Collaborator contracts consumed by the session layer
//!
//! The simulation and the config store live outside this crate. The
//! controller only talks to them through these traits.

use std::path::Path;

use super::manifest::{ConfigManifest, ManifestEntry};
use crate::error::Result;

/// Read-only view of the running game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSnapshot {
    pub paused: bool,
    pub time_up: bool,
    pub completed: bool,
    pub interrupted: bool,
}

impl GameSnapshot {
    /// Paused or finished in any way; gameplay input is not forwarded
    pub fn is_halted(&self) -> bool {
        self.paused || self.time_up || self.completed || self.interrupted
    }
}

/// Gameplay simulation
///
/// `start_new_session` runs on a worker thread while the frame thread keeps
/// querying `has_session`, so implementations synchronise internally.
pub trait SimulationService: Send + Sync {
    /// Build a session from a config document. Blocks until ready.
    fn start_new_session(&self, config_json: &str) -> Result<()>;
    fn restart(&self, config_json: &str);
    fn pause(&self);
    fn resume(&self);
    fn apply_movement(&self, dx: f32, dy: f32, speed: f32);
    fn fire(&self, pressed: bool, held: bool);
    fn drop_bomb(&self);
    fn reload(&self);
    fn rotate_towards(&self, pointer_x: f32, pointer_y: f32, angle: Option<f32>, magnitude: f32);
    fn tick(&self, dt: f32);
    fn snapshot(&self) -> GameSnapshot;
    fn has_session(&self) -> bool;
}

/// Storage for session documents and the catalog manifest
pub trait ConfigSource {
    /// The currently selected session document
    fn load_config_json(&self, root: &Path) -> Result<String>;
    fn load_manifest(&self, root: &Path) -> Result<ConfigManifest>;
    /// Replace the stored manifest as a whole
    fn save_manifest(&self, root: &Path, manifest: &ConfigManifest) -> Result<()>;
    /// Default entry when the manifest has no usable active index
    fn select_entry_index(&self, manifest: &ConfigManifest) -> usize;
    /// Read the document a manifest entry points at
    fn read_entry(&self, root: &Path, entry: &ManifestEntry) -> Result<String>;
}
