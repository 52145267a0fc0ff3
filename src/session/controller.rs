//! Session lifecycle controller
//!
//! Owns loading, pause/resume, replay, reset, catalog navigation and
//! completion bookkeeping for the active session, and keeps the derived
//! presentation parameters current.

use std::path::Path;
use std::sync::Arc;

use super::loader::{BackgroundLoad, LoadStatus};
use super::manifest::wrap_index;
use super::presentation::PresentationConfig;
use super::service::{ConfigSource, GameSnapshot, SimulationService};
use crate::error::{Result, SessionError};
use crate::input::{DeviceSnapshot, DistillerState, InputIntent, distill};

/// What a frame does, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameAction {
    Reset,
    Navigate(isize),
    Replay,
    /// Pause handling, terminal screens, then live gameplay
    Play,
}

impl FrameAction {
    fn select(intent: &InputIntent) -> Self {
        if intent.reset {
            FrameAction::Reset
        } else if intent.navigate_next_config {
            FrameAction::Navigate(1)
        } else if intent.navigate_prev_config {
            FrameAction::Navigate(-1)
        } else if intent.replay {
            FrameAction::Replay
        } else {
            FrameAction::Play
        }
    }
}

/// Transient per-session bookkeeping, rebuilt on every load
#[derive(Debug, Default)]
struct SessionRuntimeState {
    config_json: Option<String>,
    /// Completion for this session instance already persisted
    manifest_saved: bool,
    load: Option<BackgroundLoad>,
    load_finished: bool,
    load_error: Option<SessionError>,
}

fn require_config(config_json: String) -> Result<String> {
    if config_json.trim().is_empty() {
        return Err(SessionError::ConfigMissing);
    }
    Ok(config_json)
}

/// Drives one session against the simulation and config collaborators
pub struct SessionLifecycleController<S: SimulationService + ?Sized, C: ConfigSource> {
    service: Arc<S>,
    config_source: C,
    input: DistillerState,
    presentation: PresentationConfig,
    runtime: SessionRuntimeState,
}

impl<S, C> SessionLifecycleController<S, C>
where
    S: SimulationService + ?Sized + 'static,
    C: ConfigSource,
{
    pub fn new(service: Arc<S>, config_source: C) -> Self {
        Self {
            service,
            config_source,
            input: DistillerState::default(),
            presentation: PresentationConfig::default(),
            runtime: SessionRuntimeState::default(),
        }
    }

    // === Queries ===

    pub fn presentation(&self) -> &PresentationConfig {
        &self.presentation
    }

    pub fn has_session(&self) -> bool {
        self.service.has_session()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.service.snapshot()
    }

    /// Background start finished without error
    pub fn is_load_completed(&self) -> bool {
        self.runtime.load_finished && self.runtime.load_error.is_none()
    }

    pub fn has_load_error(&self) -> bool {
        self.runtime.load_error.is_some()
    }

    pub fn load_error(&self) -> Option<&SessionError> {
        self.runtime.load_error.as_ref()
    }

    /// Last session document handed to the simulation
    pub fn config_json(&self) -> Option<&str> {
        self.runtime.config_json.as_deref()
    }

    // === Loading ===

    /// Load the active document, derive presentation and start the session
    /// on a worker thread. Returns immediately; see [`poll_load`](Self::poll_load).
    pub fn begin_load(&mut self, root: &Path) -> Result<()> {
        self.runtime = SessionRuntimeState::default();

        let config_json = require_config(self.config_source.load_config_json(root)?)?;
        self.presentation.apply_json(&config_json)?;

        log::info!("Starting session load");
        match BackgroundLoad::spawn(Arc::clone(&self.service), config_json.clone()) {
            Ok(load) => self.runtime.load = Some(load),
            Err(e) => {
                log::error!("Session load could not start: {}", e);
                self.runtime.load_finished = true;
                self.runtime.load_error = Some(e);
            }
        }
        self.runtime.config_json = Some(config_json);
        Ok(())
    }

    /// Non-blocking; captures the outcome once the worker reports.
    /// A failure stays until the next [`begin_load`](Self::begin_load).
    pub fn poll_load(&mut self) {
        let Some(load) = &self.runtime.load else {
            return;
        };
        match load.poll() {
            LoadStatus::Pending => return,
            LoadStatus::Ready => log::info!("Session load finished"),
            LoadStatus::Failed(e) => {
                log::error!("Session load failed: {}", e);
                self.runtime.load_error = Some(e);
            }
        }
        self.runtime.load = None;
        self.runtime.load_finished = true;
    }

    /// Synchronous load used before any session exists, e.g. to size the window
    pub fn load_active_config(&mut self, root: &Path) -> Result<()> {
        let config_json = require_config(self.config_source.load_config_json(root)?)?;
        self.presentation.apply_json(&config_json)?;
        self.runtime.config_json = Some(config_json);
        Ok(())
    }

    // === Per-frame update ===

    /// Sample input and drive the running session for one frame
    pub fn update_playing(&mut self, dt: f32, root: &Path, devices: &DeviceSnapshot) -> Result<()> {
        if !self.service.has_session() {
            return Ok(());
        }

        let (intent, next_input) = distill(devices, &self.input);
        self.input = next_input;

        match FrameAction::select(&intent) {
            FrameAction::Reset => return self.reset_progress(root),
            FrameAction::Navigate(delta) => return self.navigate_config(root, delta),
            FrameAction::Replay => {
                self.replay();
                return Ok(());
            }
            FrameAction::Play => {}
        }

        let mut snap = self.service.snapshot();
        if intent.pause {
            if snap.paused {
                self.service.resume();
            } else {
                self.service.pause();
            }
            snap = self.service.snapshot();
        }

        if snap.is_halted() {
            if snap.completed && !self.runtime.manifest_saved {
                self.record_completion(root)?;
            }
            if intent.next {
                self.reload_active(root)?;
            }
            return Ok(());
        }

        self.forward_gameplay(&intent, dt);
        Ok(())
    }

    fn forward_gameplay(&self, intent: &InputIntent, dt: f32) {
        // Idle frames still send a zero-speed move
        let speed = if intent.is_idle() {
            0.0
        } else {
            self.presentation.move_speed()
        };
        self.service.apply_movement(intent.dx, intent.dy, speed);
        self.service.fire(intent.fire_pressed, intent.fire_held);
        if intent.drop_bomb {
            self.service.drop_bomb();
        }
        if intent.reload {
            self.service.reload();
        }
        self.service.rotate_towards(
            intent.pointer.x,
            intent.pointer.y,
            intent.aim_angle,
            intent.aim_magnitude,
        );

        if dt > 0.0 {
            self.service.tick(dt);
        }
    }

    // === Session control ===

    /// Re-derive presentation, then restart the simulation with `config_json`
    fn restart_with(&mut self, config_json: String) -> Result<()> {
        self.runtime.manifest_saved = false;
        self.presentation.apply_json(&config_json)?;
        self.service.restart(&config_json);
        self.runtime.config_json = Some(config_json);
        Ok(())
    }

    fn reload_active(&mut self, root: &Path) -> Result<()> {
        let config_json = require_config(self.config_source.load_config_json(root)?)?;
        self.restart_with(config_json)
    }

    fn replay(&self) {
        match self.runtime.config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => self.service.restart(json),
            _ => log::debug!("Replay ignored, no config loaded"),
        }
    }

    /// Clear catalog progress and restart from the default entry
    pub fn reset_progress(&mut self, root: &Path) -> Result<()> {
        let mut manifest = self.config_source.load_manifest(root)?;
        manifest.reset_progress();
        self.config_source.save_manifest(root, &manifest)?;
        log::info!("Manifest progress reset ({} entries)", manifest.len());

        self.reload_active(root)
    }

    /// Step the active catalog entry by `delta`, wrapping in both directions
    pub fn navigate_config(&mut self, root: &Path, delta: isize) -> Result<()> {
        let mut manifest = self.config_source.load_manifest(root)?;
        if manifest.is_empty() {
            return Ok(());
        }

        let current = manifest
            .valid_active_index()
            .unwrap_or_else(|| self.config_source.select_entry_index(&manifest));
        let next = wrap_index(current, delta, manifest.len());

        manifest.active_index = Some(next);
        self.config_source.save_manifest(root, &manifest)?;

        let entry = manifest.entry(next)?;
        log::info!("Navigated to config [{}] {}", next, entry.file);
        let config_json = require_config(self.config_source.read_entry(root, entry)?)?;
        self.restart_with(config_json)
    }

    fn record_completion(&mut self, root: &Path) -> Result<()> {
        let mut manifest = self.config_source.load_manifest(root)?;
        let index = self.config_source.select_entry_index(&manifest);
        if let Some(entry) = manifest.entries.get_mut(index) {
            entry.completed = true;
            self.config_source.save_manifest(root, &manifest)?;
            log::info!("Marked config [{}] completed", index);
        }
        self.runtime.manifest_saved = true;
        Ok(())
    }
}
