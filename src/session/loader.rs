//! Background session start
//!
//! The worker runs to completion on its own thread; the frame loop only ever
//! polls the one-slot completion channel. Dropping the handle abandons
//! interest in the result without stopping the worker.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError, bounded};

use super::service::SimulationService;
use crate::error::{Result, SessionError};

/// Observed state of a background start
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed(SessionError),
}

/// Handle to one in-flight session start
#[derive(Debug)]
pub struct BackgroundLoad {
    rx: Receiver<Result<()>>,
}

impl BackgroundLoad {
    /// Spawn `start_new_session` on a worker thread
    pub fn spawn<S>(service: Arc<S>, config_json: String) -> Result<Self>
    where
        S: SimulationService + ?Sized + 'static,
    {
        let (tx, rx) = bounded(1);
        thread::Builder::new()
            .name("session-load".to_string())
            .spawn(move || {
                let result = service.start_new_session(&config_json);
                if let Err(e) = &result {
                    log::warn!("Session start failed: {}", e);
                }
                // Receiver may be gone if the load was abandoned
                let _ = tx.send(result);
            })
            .map_err(|e| SessionError::LoadFailure(format!("could not spawn loader: {e}")))?;
        Ok(Self { rx })
    }

    /// Non-blocking check. Returns `Pending` until the worker reports.
    ///
    /// The result is delivered once; drop the handle after a final status.
    pub fn poll(&self) -> LoadStatus {
        match self.rx.try_recv() {
            Ok(Ok(())) => LoadStatus::Ready,
            Ok(Err(e)) => LoadStatus::Failed(match e {
                SessionError::LoadFailure(msg) => SessionError::LoadFailure(msg),
                other => SessionError::LoadFailure(other.to_string()),
            }),
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Disconnected) => LoadStatus::Failed(SessionError::LoadFailure(
                "loader exited without reporting".to_string(),
            )),
        }
    }
}
