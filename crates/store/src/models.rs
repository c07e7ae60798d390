//! Entity types the record store persists.
//!
//! These are plain records — behaviour beyond construction and small state
//! transitions lives in the engine crate.

use chrono::{DateTime, Utc};
use nodes::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ExecutionStatus
// ---------------------------------------------------------------------------

/// Lifecycle of an execution record: `pending → running → success | error`.
/// The two terminal states are never left once entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Success,
    Error,
}

impl ExecutionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "success" => Ok(Self::Success),
            "error"   => Ok(Self::Error),
            other     => Err(format!("unknown execution status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A named, typed operation template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub name: String,
    pub kind: NodeKind,
    pub description: Option<String>,
    /// Default parameters; overridden key-by-key at execution time.
    pub configuration: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        kind: NodeKind,
        configuration: Map<String, Value>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            description: None,
            configuration,
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// An ordered list of steps (the steps themselves are separate records).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowStep
// ---------------------------------------------------------------------------

/// One step of a workflow: a node reference plus step-local parameters.
///
/// The step sequence is defined by ascending `order`, not list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub node_id: Uuid,
    pub order: i32,
    /// Overrides the node's stored configuration key-by-key.
    pub parameters: Map<String, Value>,
}

impl WorkflowStep {
    pub fn new(workflow_id: Uuid, node_id: Uuid, order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            node_id,
            order,
            parameters: Map::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// NodeExecution
// ---------------------------------------------------------------------------

/// Audit record of a single node invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExecution {
    pub id: Uuid,
    pub node_id: Uuid,
    pub status: ExecutionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub output: Option<String>,
    pub error_message: Option<String>,
    /// Parameter set the caller supplied for this invocation.
    pub parameters: Map<String, Value>,
}

impl NodeExecution {
    /// A fresh record in `running` status, stamped now.
    pub fn started(node_id: Uuid, parameters: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            node_id,
            status: ExecutionStatus::Running,
            start_time: Utc::now(),
            end_time: None,
            output: None,
            error_message: None,
            parameters,
        }
    }

    /// Enter the `success` terminal state.
    pub fn complete(&mut self, output: String) {
        self.status = ExecutionStatus::Success;
        self.output = Some(output);
        self.end_time = Some(Utc::now());
    }

    /// Enter the `error` terminal state.
    pub fn fail(&mut self, error: String) {
        self.status = ExecutionStatus::Error;
        self.error_message = Some(error);
        self.end_time = Some(Utc::now());
    }
}

// ---------------------------------------------------------------------------
// WorkflowExecution
// ---------------------------------------------------------------------------

/// Audit record of a full workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub id: Uuid,
    pub workflow_id: Uuid,
    pub status: ExecutionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// 1-based cursor of the step in flight or last attempted; 0 before the
    /// first step. Only ever increases during a run.
    pub current_step: u32,
    /// Concatenated per-step output log.
    pub output: Option<String>,
    pub error_message: Option<String>,
}

impl WorkflowExecution {
    /// A fresh record in `running` status, stamped now.
    pub fn started(workflow_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            status: ExecutionStatus::Running,
            start_time: Utc::now(),
            end_time: None,
            current_step: 0,
            output: None,
            error_message: None,
        }
    }

    pub fn complete(&mut self, output: String) {
        self.status = ExecutionStatus::Success;
        self.output = Some(output);
        self.end_time = Some(Utc::now());
    }

    pub fn fail(&mut self, error: String, output: String) {
        self.status = ExecutionStatus::Error;
        self.error_message = Some(error);
        self.output = Some(output);
        self.end_time = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for status in [
            ExecutionStatus::Pending,
            ExecutionStatus::Running,
            ExecutionStatus::Success,
            ExecutionStatus::Error,
        ] {
            let parsed: ExecutionStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn only_success_and_error_are_terminal() {
        assert!(!ExecutionStatus::Pending.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Success.is_terminal());
        assert!(ExecutionStatus::Error.is_terminal());
    }

    #[test]
    fn node_execution_transitions_stamp_end_time() {
        let mut exec = NodeExecution::started(Uuid::new_v4(), Map::new());
        assert_eq!(exec.status, ExecutionStatus::Running);
        assert!(exec.end_time.is_none());

        exec.complete("done".into());
        assert_eq!(exec.status, ExecutionStatus::Success);
        assert_eq!(exec.output.as_deref(), Some("done"));
        assert!(exec.end_time.is_some());
    }
}
