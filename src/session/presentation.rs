//! Presentation parameters derived from a session document
//!
//! Renderers poll `version` to decide when to re-derive window and stage
//! resources.

use serde::Deserialize;

use crate::error::Result;

/// Stage boundary margins as written in the session document
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StageBounds {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

/// The subset of a session document this crate reads
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SessionDocument {
    player_speed: f32,
    stage_config: StageBounds,
}

/// Values derived from one session document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresentationValues {
    pub move_speed: f32,
    pub stage_width: f32,
    pub stage_height: f32,
    pub border_size: i32,
}

impl PresentationValues {
    /// Parse a session document and derive its presentation values
    pub fn from_json(config_json: &str) -> Result<Self> {
        let doc: SessionDocument = serde_json::from_str(config_json)?;
        let stage = doc.stage_config;
        Ok(Self {
            move_speed: doc.player_speed,
            stage_width: stage.right + stage.left,
            stage_height: stage.bottom + stage.top,
            border_size: stage.left.min(stage.top).floor() as i32,
        })
    }
}

/// Cached presentation values with a change counter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresentationConfig {
    pub values: PresentationValues,
    /// Bumped once per distinct change, starts at 0
    pub version: u32,
}

impl PresentationConfig {
    pub fn move_speed(&self) -> f32 {
        self.values.move_speed
    }

    pub fn stage_width(&self) -> f32 {
        self.values.stage_width
    }

    pub fn stage_height(&self) -> f32 {
        self.values.stage_height
    }

    pub fn border_size(&self) -> i32 {
        self.values.border_size
    }

    /// Store new values; returns true if the version was bumped
    pub fn apply(&mut self, values: PresentationValues) -> bool {
        let changed = values != self.values;
        self.values = values;
        if changed {
            self.version += 1;
            log::debug!(
                "Presentation v{}: {}x{} border {} speed {}",
                self.version,
                values.stage_width,
                values.stage_height,
                values.border_size,
                values.move_speed
            );
        }
        changed
    }

    /// Parse, derive and apply in one step
    pub fn apply_json(&mut self, config_json: &str) -> Result<bool> {
        Ok(self.apply(PresentationValues::from_json(config_json)?))
    }
}
