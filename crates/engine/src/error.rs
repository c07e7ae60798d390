//! Engine-level error type.

use thiserror::Error;

/// Faults the engine cannot fold into an execution record.
///
/// In practice this is only the failure to create the *initial* execution
/// record — once a record exists, every later fault is written into it and
/// surfaced through [`crate::ExecutionResult`] instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Persistence error from the record store.
    #[error("record store error: {0}")]
    Store(#[from] store::StoreError),
}
