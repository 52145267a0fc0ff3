//! Per-frame player intent

use glam::Vec2;

/// One frame's distilled, device-independent input
///
/// Built fresh every update. Edge commands are true only on the frame the
/// binding goes from released to pressed; `fire_held` is a level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Horizontal movement, clamped to [-1, 1]
    pub dx: f32,
    /// Vertical movement (+Y down), clamped to [-1, 1]
    pub dy: f32,
    /// Raw pointer position in screen pixels
    pub pointer: Vec2,
    /// Aim angle in radians, only outside the stick dead zone
    pub aim_angle: Option<f32>,
    /// Aim strength in [0, 1]
    pub aim_magnitude: f32,

    pub fire_pressed: bool,
    pub fire_held: bool,
    pub drop_bomb: bool,
    pub reload: bool,
    pub pause: bool,
    pub next: bool,
    pub replay: bool,
    pub reset: bool,
    pub navigate_next_config: bool,
    pub navigate_prev_config: bool,
}

impl InputIntent {
    /// True when neither axis carries movement
    pub fn is_idle(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}
