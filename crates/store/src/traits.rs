//! The `RecordStore` trait — the persistence seam the engine writes through.
//!
//! One method per discrete store operation; implementations commit each call
//! before returning so a crash between engine steps leaves a durable,
//! inspectable partial-progress record.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Node, NodeExecution, Workflow, WorkflowExecution, WorkflowStep};
use crate::StoreError;

#[async_trait]
pub trait RecordStore: Send + Sync {
    // ------ nodes ------

    async fn insert_node(&self, node: Node) -> Result<(), StoreError>;
    async fn get_node(&self, id: Uuid) -> Result<Node, StoreError>;
    async fn update_node(&self, node: Node) -> Result<(), StoreError>;
    /// Delete a node, cascading to its executions and any workflow steps
    /// that reference it.
    async fn delete_node(&self, id: Uuid) -> Result<(), StoreError>;

    // ------ workflows ------

    async fn insert_workflow(&self, workflow: Workflow) -> Result<(), StoreError>;
    async fn get_workflow(&self, id: Uuid) -> Result<Workflow, StoreError>;
    /// Delete a workflow, cascading to its steps and executions.
    async fn delete_workflow(&self, id: Uuid) -> Result<(), StoreError>;

    // ------ workflow steps ------

    async fn add_step(&self, step: WorkflowStep) -> Result<(), StoreError>;
    /// A workflow's steps in execution order: ascending `order`, ties
    /// resolved stably by insertion order.
    async fn steps_of(&self, workflow_id: Uuid) -> Result<Vec<WorkflowStep>, StoreError>;

    // ------ node executions ------

    async fn insert_node_execution(&self, execution: NodeExecution) -> Result<(), StoreError>;
    async fn update_node_execution(&self, execution: NodeExecution) -> Result<(), StoreError>;
    async fn get_node_execution(&self, id: Uuid) -> Result<NodeExecution, StoreError>;
    /// A node's execution history, newest first.
    async fn executions_of_node(&self, node_id: Uuid) -> Result<Vec<NodeExecution>, StoreError>;

    // ------ workflow executions ------

    async fn insert_workflow_execution(
        &self,
        execution: WorkflowExecution,
    ) -> Result<(), StoreError>;
    async fn update_workflow_execution(
        &self,
        execution: WorkflowExecution,
    ) -> Result<(), StoreError>;
    async fn get_workflow_execution(&self, id: Uuid) -> Result<WorkflowExecution, StoreError>;
    /// A workflow's run history, newest first.
    async fn executions_of_workflow(
        &self,
        workflow_id: Uuid,
    ) -> Result<Vec<WorkflowExecution>, StoreError>;
}
