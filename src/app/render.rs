//! Renderer contract
//!
//! The app hands over what to show; pixels, shaders and textures are the
//! implementation's business.

use crate::session::{GameSnapshot, PresentationConfig};

/// Non-session screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenView<'a> {
    Title,
    Loading { message: &'a str, progress: f32 },
    /// Playing but no session yet
    Blank,
}

pub trait Renderer {
    /// Called whenever the presentation version moves
    fn apply_presentation(&mut self, presentation: &PresentationConfig);
    fn draw_screen(&mut self, view: ScreenView<'_>, time: f32);
    fn draw_session(&mut self, snapshot: &GameSnapshot, time: f32);
}
