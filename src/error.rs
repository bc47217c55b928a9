//! Fatal error types
//!
//! Gameplay never produces these: invalid actions are plain `bool`/`Option`
//! outcomes. Everything here means a packaging or programming defect and is
//! propagated to `main`.

use std::path::PathBuf;

use thiserror::Error;

use crate::states::StateId;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load resource {path:?}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("state not registered: {0:?}")]
    StateNotFound(StateId),
    #[error("frame index {index} out of range (len {len})")]
    FrameOutOfRange { index: usize, len: usize },
    #[error("invalid settings")]
    Settings(#[from] serde_json::Error),
    #[error("io error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
