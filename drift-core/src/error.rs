//! Error type for the few preconditions the core validates.
//!
//! Every smoother and noise operation is total over finite inputs; only the
//! integer hash distribution has a documented precondition.

use thiserror::Error;

/// Root error type for `drift-core`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftError {
    /// An integer range with `max <= min` was passed to a distribution.
    #[error("invalid range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: i128, max: i128 },

    /// An integer bound does not fit the 128-bit working range.
    #[error("integer bound is not representable in 128-bit arithmetic")]
    Unrepresentable,
}

pub type Result<T> = core::result::Result<T, DriftError>;
