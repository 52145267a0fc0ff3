//! Raw devices → InputIntent
//!
//! Distillation is a pure step: the previous frame's snapshots and the
//! smoothed aim stick go in, the intent and the next state come out.

use glam::Vec2;

use super::devices::{DeviceSnapshot, Key, PadButton};
use super::intent::InputIntent;
use crate::consts::{AIM_DEAD_ZONE_SQ, AIM_SMOOTHING, FIRE_TRIGGER_THRESHOLD};

/// Alternative bindings for one edge-triggered command
struct Binding {
    keys: &'static [Key],
    pad: &'static [PadButton],
}

const DROP_BOMB: Binding = Binding {
    keys: &[Key::Q],
    pad: &[PadButton::A],
};
const RELOAD: Binding = Binding {
    keys: &[Key::E],
    pad: &[PadButton::X],
};
const PAUSE: Binding = Binding {
    keys: &[Key::P],
    pad: &[PadButton::Start],
};
const NEXT: Binding = Binding {
    keys: &[Key::R],
    pad: &[PadButton::Y],
};
const REPLAY: Binding = Binding {
    keys: &[Key::F6],
    pad: &[PadButton::LeftShoulder],
};
const RESET: Binding = Binding {
    keys: &[Key::F8],
    pad: &[PadButton::RightShoulder],
};
const NAVIGATE_NEXT: Binding = Binding {
    keys: &[Key::F10],
    pad: &[],
};
const NAVIGATE_PREV: Binding = Binding {
    keys: &[Key::F9],
    pad: &[],
};

impl Binding {
    fn just_pressed(&self, cur: &DeviceSnapshot, prev: &DeviceSnapshot) -> bool {
        self.keys
            .iter()
            .any(|&k| cur.keyboard.just_pressed(k, &prev.keyboard))
            || self
                .pad
                .iter()
                .any(|&b| cur.gamepad.just_pressed(b, &prev.gamepad))
    }
}

/// Everything distillation carries from one frame to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistillerState {
    pub previous: DeviceSnapshot,
    /// Low-pass filtered right stick, screen orientation (+Y down)
    pub smoothed_aim: Vec2,
}

/// Distill one frame of device input
pub fn distill(current: &DeviceSnapshot, state: &DistillerState) -> (InputIntent, DistillerState) {
    let prev = &state.previous;
    let kb = &current.keyboard;
    let pad = &current.gamepad;

    let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
    let dx = axis(
        kb.is_down(Key::Right) || kb.is_down(Key::D),
        kb.is_down(Key::Left) || kb.is_down(Key::A),
    ) + pad.left_stick.x;
    let dy = axis(
        kb.is_down(Key::Down) || kb.is_down(Key::S),
        kb.is_down(Key::Up) || kb.is_down(Key::W),
    ) - pad.left_stick.y;

    let fire_pressed = kb.just_pressed(Key::Space, &prev.keyboard)
        || current.mouse.just_clicked(&prev.mouse)
        || pad.just_pressed(PadButton::RightTrigger, &prev.gamepad);
    let fire_held = kb.is_down(Key::Space)
        || current.mouse.left_down
        || pad.right_trigger > FIRE_TRIGGER_THRESHOLD;

    // Smoothing only advances while a pad is present
    let smoothed_aim = if pad.connected {
        let raw = Vec2::new(pad.right_stick.x, -pad.right_stick.y);
        state.smoothed_aim.lerp(raw, AIM_SMOOTHING)
    } else {
        state.smoothed_aim
    };
    let (aim_angle, aim_magnitude) = aim_from_stick(smoothed_aim);

    let intent = InputIntent {
        dx: dx.clamp(-1.0, 1.0),
        dy: dy.clamp(-1.0, 1.0),
        pointer: current.mouse.position,
        aim_angle,
        aim_magnitude,
        fire_pressed,
        fire_held,
        drop_bomb: DROP_BOMB.just_pressed(current, prev),
        reload: RELOAD.just_pressed(current, prev),
        pause: PAUSE.just_pressed(current, prev),
        next: NEXT.just_pressed(current, prev),
        replay: REPLAY.just_pressed(current, prev),
        reset: RESET.just_pressed(current, prev),
        navigate_next_config: NAVIGATE_NEXT.just_pressed(current, prev),
        navigate_prev_config: NAVIGATE_PREV.just_pressed(current, prev),
    };

    let next_state = DistillerState {
        previous: current.clone(),
        smoothed_aim,
    };
    (intent, next_state)
}

/// Angle and magnitude for a smoothed stick, or no aim inside the dead zone
fn aim_from_stick(stick: Vec2) -> (Option<f32>, f32) {
    if stick.length_squared() > AIM_DEAD_ZONE_SQ {
        (Some(stick.y.atan2(stick.x)), stick.length().clamp(0.0, 1.0))
    } else {
        (None, 0.0)
    }
}

/// Owns a [`DistillerState`] for callers that sample once per frame
#[derive(Debug, Default)]
pub struct InputDistiller {
    state: DistillerState,
}

impl InputDistiller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, current: &DeviceSnapshot) -> InputIntent {
        let (intent, next) = distill(current, &self.state);
        self.state = next;
        intent
    }

    pub fn state(&self) -> &DistillerState {
        &self.state
    }
}
