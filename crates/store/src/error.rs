use setlatro_core::{RunError, SnapshotError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("save file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file format: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the caller sent something the game rejected, as opposed to a
    /// missing session, a faulted ability or a storage failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Run(err) if !matches!(err, RunError::AbilityFault { .. }))
    }
}
