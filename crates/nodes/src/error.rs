//! Handler-level error type.
//!
//! The variant carries the taxonomy (what class of failure this was); the
//! message text is the externally observable contract — it is stored
//! verbatim in the execution record and returned to the caller, so handlers
//! format it at the failure site.

use thiserror::Error;

/// Errors returned by an operation handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// A required configuration key is missing or has the wrong shape.
    /// Always detected before any external side effect.
    #[error("{0}")]
    Validation(String),

    /// An external process could not be started or exited non-zero.
    #[error("{0}")]
    Process(String),

    /// An external process exceeded its wall-clock ceiling.
    #[error("{what} timed out after {limit_secs} seconds")]
    Timeout { what: String, limit_secs: u64 },

    /// A filesystem operation failed; the message names the offending path.
    #[error("{0}")]
    Filesystem(String),
}
