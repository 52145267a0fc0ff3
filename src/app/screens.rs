//! Title and loading screen logic
//!
//! Only the request flags and timing live here; drawing belongs to the
//! renderer.

use crate::consts::{MIN_LOADING_FLOOR_SECS, MIN_LOADING_SECS};
use crate::input::{DeviceSnapshot, Key, KeyboardState};

/// Title screen requests
#[derive(Debug, Default)]
pub struct TitleScreen {
    start_requested: bool,
    quit_requested: bool,
}

impl TitleScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start button clicked
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Quit button clicked
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn start_requested(&self) -> bool {
        self.start_requested
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn reset_flags(&mut self) {
        self.start_requested = false;
        self.quit_requested = false;
    }

    /// Enter starts, Escape quits. `prev` is last frame's keyboard.
    pub fn update(&mut self, devices: &DeviceSnapshot, prev: &KeyboardState) {
        let kb = &devices.keyboard;
        if kb.just_pressed(Key::Enter, prev) {
            self.start_requested = true;
        }
        if kb.just_pressed(Key::Escape, prev) {
            self.quit_requested = true;
        }
    }
}

/// Loading screen with a minimum display time
#[derive(Debug)]
pub struct LoadingScreen {
    started: bool,
    completed: bool,
    elapsed: f32,
    min_duration: f32,
    message: String,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self {
            started: false,
            completed: false,
            elapsed: 0.0,
            min_duration: MIN_LOADING_SECS,
            message: "Loading...".to_string(),
        }
    }
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, message: &str, min_duration_secs: f32) {
        self.started = true;
        self.completed = false;
        self.elapsed = 0.0;
        self.min_duration = min_duration_secs.max(MIN_LOADING_FLOOR_SECS);
        self.message = if message.trim().is_empty() {
            "Loading session...".to_string()
        } else {
            message.to_string()
        };
    }

    /// Advance the timer; completes once the backend is done and the
    /// minimum time has passed
    pub fn update(&mut self, dt: f32, backend_finished: bool) {
        if !self.started || self.completed {
            return;
        }
        self.elapsed += dt;
        if backend_finished && self.elapsed >= self.min_duration {
            self.completed = true;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Fraction of the minimum duration shown so far, capped at 1
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.min_duration).min(1.0)
    }
}
