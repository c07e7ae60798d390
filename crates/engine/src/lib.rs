//! `engine` crate — the node executor and the workflow engine.
//!
//! [`NodeExecutor`] runs a single node against an effective configuration
//! and records the attempt; [`WorkflowEngine`] runs an ordered list of steps
//! fail-fast, recording per-step progress and the final outcome. Both
//! convert every failure into a structured result — neither lets a fault
//! escape to its caller undocumented.

pub mod error;
pub mod executor;
pub mod result;
pub mod workflow;

pub use workflow::WorkflowEngine;
pub use error::EngineError;
pub use executor::NodeExecutor;
pub use result::{ExecutionResult, RunResult};
