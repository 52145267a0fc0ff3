//! Test doubles for the session collaborators

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::error::{Result, SessionError};
use crate::session::{ConfigManifest, ConfigSource, GameSnapshot, ManifestEntry, SimulationService};

/// Calls observed by [`RecordingSimulation`]
#[derive(Debug, Clone, PartialEq)]
pub enum SimCall {
    Start(String),
    Restart(String),
    Pause,
    Resume,
    Move(f32, f32, f32),
    Fire(bool, bool),
    DropBomb,
    Reload,
    Rotate(f32, f32, Option<f32>, f32),
    Tick(f32),
}

#[derive(Default)]
struct SimInner {
    calls: Vec<SimCall>,
    snapshot: GameSnapshot,
    has_session: bool,
}

enum StartBehavior {
    Succeed,
    Fail(String),
    Panic,
    Gated,
}

/// Simulation double that records every call
pub struct RecordingSimulation {
    inner: Mutex<SimInner>,
    behavior: StartBehavior,
    gate: (Mutex<bool>, Condvar),
}

impl RecordingSimulation {
    fn with_behavior(behavior: StartBehavior) -> Self {
        Self {
            inner: Mutex::new(SimInner::default()),
            behavior,
            gate: (Mutex::new(false), Condvar::new()),
        }
    }

    pub fn new() -> Self {
        Self::with_behavior(StartBehavior::Succeed)
    }

    pub fn failing(message: &str) -> Self {
        Self::with_behavior(StartBehavior::Fail(message.to_string()))
    }

    pub fn panicking() -> Self {
        Self::with_behavior(StartBehavior::Panic)
    }

    /// Start blocks until [`open_gate`](Self::open_gate)
    pub fn gated() -> Self {
        Self::with_behavior(StartBehavior::Gated)
    }

    pub fn open_gate(&self) {
        let (lock, cvar) = &self.gate;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }

    fn inner(&self) -> MutexGuard<'_, SimInner> {
        self.inner.lock().unwrap()
    }

    /// A session that is already running
    pub fn with_session() -> Self {
        let sim = Self::new();
        sim.inner().has_session = true;
        sim
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        self.inner().snapshot = snapshot;
    }

    pub fn calls(&self) -> Vec<SimCall> {
        self.inner().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner().calls.clear();
    }

    fn record(&self, call: SimCall) {
        self.inner().calls.push(call);
    }
}

impl SimulationService for RecordingSimulation {
    fn start_new_session(&self, config_json: &str) -> Result<()> {
        self.record(SimCall::Start(config_json.to_string()));
        match &self.behavior {
            StartBehavior::Succeed => {}
            StartBehavior::Fail(msg) => return Err(SessionError::LoadFailure(msg.clone())),
            StartBehavior::Panic => panic!("simulation exploded"),
            StartBehavior::Gated => {
                let (lock, cvar) = &self.gate;
                let mut open = lock.lock().unwrap();
                while !*open {
                    open = cvar.wait(open).unwrap();
                }
            }
        }
        let mut inner = self.inner();
        inner.has_session = true;
        inner.snapshot = GameSnapshot::default();
        Ok(())
    }

    fn restart(&self, config_json: &str) {
        let mut inner = self.inner();
        inner.calls.push(SimCall::Restart(config_json.to_string()));
        inner.snapshot = GameSnapshot::default();
    }

    fn pause(&self) {
        let mut inner = self.inner();
        inner.calls.push(SimCall::Pause);
        inner.snapshot.paused = true;
    }

    fn resume(&self) {
        let mut inner = self.inner();
        inner.calls.push(SimCall::Resume);
        inner.snapshot.paused = false;
    }

    fn apply_movement(&self, dx: f32, dy: f32, speed: f32) {
        self.record(SimCall::Move(dx, dy, speed));
    }

    fn fire(&self, pressed: bool, held: bool) {
        self.record(SimCall::Fire(pressed, held));
    }

    fn drop_bomb(&self) {
        self.record(SimCall::DropBomb);
    }

    fn reload(&self) {
        self.record(SimCall::Reload);
    }

    fn rotate_towards(&self, pointer_x: f32, pointer_y: f32, angle: Option<f32>, magnitude: f32) {
        self.record(SimCall::Rotate(pointer_x, pointer_y, angle, magnitude));
    }

    fn tick(&self, dt: f32) {
        self.record(SimCall::Tick(dt));
    }

    fn snapshot(&self) -> GameSnapshot {
        self.inner().snapshot
    }

    fn has_session(&self) -> bool {
        self.inner().has_session
    }
}

#[derive(Default)]
struct SourceInner {
    manifest: ConfigManifest,
    documents: HashMap<String, String>,
    saves: usize,
}

/// In-memory config source; clones share storage
#[derive(Clone, Default)]
pub struct MemoryConfigSource {
    inner: Arc<Mutex<SourceInner>>,
}

impl MemoryConfigSource {
    /// One entry per `(file, document)` pair
    pub fn with_documents(docs: &[(&str, String)]) -> Self {
        let source = Self::default();
        {
            let mut inner = source.inner.lock().unwrap();
            for (file, text) in docs {
                inner.manifest.entries.push(ManifestEntry::new(*file));
                inner.documents.insert(file.to_string(), text.clone());
            }
        }
        source
    }

    pub fn manifest(&self) -> ConfigManifest {
        self.inner.lock().unwrap().manifest.clone()
    }

    pub fn set_manifest(&self, manifest: ConfigManifest) {
        self.inner.lock().unwrap().manifest = manifest;
    }

    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().saves
    }
}

impl ConfigSource for MemoryConfigSource {
    fn load_config_json(&self, root: &Path) -> Result<String> {
        let manifest = self.load_manifest(root)?;
        if manifest.is_empty() {
            return Ok(String::new());
        }
        let entry = manifest.entry(self.select_entry_index(&manifest))?;
        self.read_entry(root, entry)
    }

    fn load_manifest(&self, _root: &Path) -> Result<ConfigManifest> {
        Ok(self.manifest())
    }

    fn save_manifest(&self, _root: &Path, manifest: &ConfigManifest) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.manifest = manifest.clone();
        inner.saves += 1;
        Ok(())
    }

    fn select_entry_index(&self, manifest: &ConfigManifest) -> usize {
        manifest
            .valid_active_index()
            .or_else(|| manifest.entries.iter().position(|e| !e.completed))
            .unwrap_or(0)
    }

    fn read_entry(&self, _root: &Path, entry: &ManifestEntry) -> Result<String> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .documents
            .get(&entry.file)
            .cloned()
            .unwrap_or_default())
    }
}

/// A minimal valid session document
pub fn stage_doc(speed: f32, left: f32, top: f32, right: f32, bottom: f32) -> String {
    format!(
        r#"{{"PlayerSpeed":{speed},"StageConfig":{{"Left":{left},"Top":{top},"Right":{right},"Bottom":{bottom}}}}}"#
    )
}
