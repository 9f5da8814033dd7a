//! Engine-level errors.

use drift_core::DriftError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A core precondition failed (e.g. an empty integer range).
    #[error(transparent)]
    Core(#[from] DriftError),

    /// A rig or node configuration is out of its valid domain.
    #[error("config error: {0}")]
    Config(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
