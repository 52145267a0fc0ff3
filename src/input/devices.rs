//! Point-in-time device snapshots
//!
//! The host samples keyboard, mouse and gamepad once per frame and hands the
//! result to the core. Nothing here talks to an OS or windowing layer.

use std::collections::HashSet;

use glam::Vec2;

/// Keyboard keys the client binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Q,
    E,
    P,
    R,
    Space,
    Enter,
    Escape,
    F6,
    F8,
    F9,
    F10,
}

/// Gamepad buttons the client binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    A,
    X,
    Y,
    Start,
    LeftShoulder,
    RightShoulder,
    /// Digital view of the right trigger
    RightTrigger,
}

/// Keys held this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state with the given keys held
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Down this frame, up in `prev`
    pub fn just_pressed(&self, key: Key, prev: &KeyboardState) -> bool {
        self.is_down(key) && !prev.is_down(key)
    }
}

/// Pointer position and primary button
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub position: Vec2,
    pub left_down: bool,
}

impl MouseState {
    pub fn just_clicked(&self, prev: &MouseState) -> bool {
        self.left_down && !prev.left_down
    }

    pub fn just_released(&self, prev: &MouseState) -> bool {
        !self.left_down && prev.left_down
    }
}

/// First-player gamepad
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub connected: bool,
    pub buttons: HashSet<PadButton>,
    /// Left stick, +Y up
    pub left_stick: Vec2,
    /// Right stick, +Y up
    pub right_stick: Vec2,
    /// Analog right trigger in [0, 1]
    pub right_trigger: f32,
}

impl GamepadState {
    /// A connected pad with no input
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Default::default()
        }
    }

    pub fn is_down(&self, button: PadButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn just_pressed(&self, button: PadButton, prev: &GamepadState) -> bool {
        self.is_down(button) && !prev.is_down(button)
    }
}

/// Every device, sampled once per frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub gamepad: GamepadState,
}

impl DeviceSnapshot {
    /// Snapshot with only the given keys held
    pub fn keys(keys: &[Key]) -> Self {
        Self {
            keyboard: KeyboardState::with_keys(keys),
            ..Default::default()
        }
    }
}
