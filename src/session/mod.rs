//! Session lifecycle
//!
//! Everything between a catalog of session documents and a running
//! simulation:
//! - `controller`: per-frame lifecycle driver
//! - `loader`: background session start with polled completion
//! - `manifest`: catalog entries, completion flags, wraparound navigation
//! - `presentation`: stage sizing and movement speed with a change version
//! - `service`: simulation and config-source contracts
//! - `file_source`: on-disk config source

pub mod controller;
pub mod file_source;
pub mod loader;
pub mod manifest;
pub mod presentation;
pub mod service;

pub use controller::SessionLifecycleController;
pub use file_source::{FileConfigSource, MANIFEST_FILE};
pub use loader::{BackgroundLoad, LoadStatus};
pub use manifest::{ConfigManifest, ManifestEntry, wrap_index};
pub use presentation::{PresentationConfig, PresentationValues};
pub use service::{ConfigSource, GameSnapshot, SimulationService};
