//! Structured success/failure results returned by both engine layers.

use uuid::Uuid;

/// Outcome of executing one node or one workflow: either the produced
/// output text or a human-readable error message. Failure is part of the
/// contract, not an out-of-band control transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success { output: String },
    Failure { error: String },
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success { output: output.into() }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The output text, if this is the success variant.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success { output } => Some(output),
            Self::Failure { .. } => None,
        }
    }

    /// The error message, if this is the failure variant.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Outcome of a workflow run, tied to the execution record it produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// ID of the `WorkflowExecution` record created for this run.
    pub execution_id: Uuid,
    pub result: ExecutionResult,
}
