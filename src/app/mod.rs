//! App flow
//!
//! Owns the Title/Loading/Playing states and mediates between the screens,
//! the session controller and the renderer.

pub mod render;
pub mod screens;
pub mod state_machine;

pub use render::{Renderer, ScreenView};
pub use screens::{LoadingScreen, TitleScreen};
pub use state_machine::{AppControl, AppState, AppStateMachine};
