//! Swarm KC - client orchestration for an arcade shooter
//!
//! Core modules:
//! - `input`: Raw device snapshots → per-frame intent
//! - `session`: Session lifecycle, catalog navigation, presentation config
//! - `app`: Title/Loading/Playing flow and the renderer contract
//! - `settings`: Client preferences
//!
//! The simulation, the config store and the renderer are collaborators
//! reached through traits.

pub mod app;
pub mod error;
pub mod input;
pub mod session;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{AppControl, AppState, AppStateMachine};
pub use error::{Result, SessionError};
pub use input::{InputDistiller, InputIntent};
pub use session::SessionLifecycleController;
pub use settings::ClientSettings;

/// Client tuning constants
pub mod consts {
    /// Right-stick low-pass factor per frame
    pub const AIM_SMOOTHING: f32 = 0.2;
    /// Squared smoothed-stick length below which there is no aim
    pub const AIM_DEAD_ZONE_SQ: f32 = 0.15;
    /// Analog trigger value that counts as holding fire
    pub const FIRE_TRIGGER_THRESHOLD: f32 = 0.3;

    /// Default minimum loading screen time (seconds)
    pub const MIN_LOADING_SECS: f32 = 1.25;
    /// Lower bound for any loading screen time
    pub const MIN_LOADING_FLOOR_SECS: f32 = 0.1;
    /// Largest frame delta forwarded to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
}
