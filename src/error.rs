//! Session error types
//!
//! Background start failures are stored and polled; everything else
//! propagates synchronously to the caller of the frame update.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the session layer and its collaborators
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("active game session config is empty")]
    ConfigMissing,

    #[error("manifest entry {index} is invalid: {reason}")]
    ManifestEntryInvalid { index: usize, reason: String },

    #[error("session start failed: {0}")]
    LoadFailure(String),

    #[error("malformed session document: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config I/O on {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
