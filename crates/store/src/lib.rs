//! `store` crate — the record store the engine persists into.
//!
//! Provides the entity types, the [`RecordStore`] trait the engine consumes,
//! and [`MemoryStore`], an in-memory implementation. No business logic lives
//! here; the engine decides what to write and when.

pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{
    ExecutionStatus, Node, NodeExecution, Workflow, WorkflowExecution, WorkflowStep,
};
pub use traits::RecordStore;
