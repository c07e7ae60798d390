//! In-memory `RecordStore` implementation.
//!
//! Backs tests and the CLI. Steps are kept in insertion order so the
//! `order`-field sort in [`RecordStore::steps_of`] is a stable one — two
//! steps sharing an `order` value run in the order they were added.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Node, NodeExecution, Workflow, WorkflowExecution, WorkflowStep};
use crate::{RecordStore, StoreError};

#[derive(Default)]
struct Tables {
    nodes: HashMap<Uuid, Node>,
    workflows: HashMap<Uuid, Workflow>,
    steps: Vec<WorkflowStep>,
    node_executions: HashMap<Uuid, NodeExecution>,
    workflow_executions: HashMap<Uuid, WorkflowExecution>,
}

/// Thread-safe in-memory record store.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    // ------ nodes ------

    async fn insert_node(&self, node: Node) -> Result<(), StoreError> {
        debug!(node_id = %node.id, name = %node.name, "insert node");
        self.tables.write().await.nodes.insert(node.id, node);
        Ok(())
    }

    async fn get_node(&self, id: Uuid) -> Result<Node, StoreError> {
        self.tables
            .read()
            .await
            .nodes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("node", id))
    }

    async fn update_node(&self, node: Node) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.nodes.contains_key(&node.id) {
            return Err(StoreError::not_found("node", node.id));
        }
        tables.nodes.insert(node.id, node);
        Ok(())
    }

    async fn delete_node(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.nodes.remove(&id).is_none() {
            return Err(StoreError::not_found("node", id));
        }
        tables.node_executions.retain(|_, e| e.node_id != id);
        tables.steps.retain(|s| s.node_id != id);
        Ok(())
    }

    // ------ workflows ------

    async fn insert_workflow(&self, workflow: Workflow) -> Result<(), StoreError> {
        debug!(workflow_id = %workflow.id, name = %workflow.name, "insert workflow");
        self.tables
            .write()
            .await
            .workflows
            .insert(workflow.id, workflow);
        Ok(())
    }

    async fn get_workflow(&self, id: Uuid) -> Result<Workflow, StoreError> {
        self.tables
            .read()
            .await
            .workflows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("workflow", id))
    }

    async fn delete_workflow(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.workflows.remove(&id).is_none() {
            return Err(StoreError::not_found("workflow", id));
        }
        tables.steps.retain(|s| s.workflow_id != id);
        tables.workflow_executions.retain(|_, e| e.workflow_id != id);
        Ok(())
    }

    // ------ workflow steps ------

    async fn add_step(&self, step: WorkflowStep) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.workflows.contains_key(&step.workflow_id) {
            return Err(StoreError::not_found("workflow", step.workflow_id));
        }
        if !tables.nodes.contains_key(&step.node_id) {
            return Err(StoreError::not_found("node", step.node_id));
        }
        tables.steps.push(step);
        Ok(())
    }

    async fn steps_of(&self, workflow_id: Uuid) -> Result<Vec<WorkflowStep>, StoreError> {
        let tables = self.tables.read().await;
        let mut steps: Vec<WorkflowStep> = tables
            .steps
            .iter()
            .filter(|s| s.workflow_id == workflow_id)
            .cloned()
            .collect();
        // Stable: equal `order` values keep insertion order.
        steps.sort_by_key(|s| s.order);
        Ok(steps)
    }

    // ------ node executions ------

    async fn insert_node_execution(&self, execution: NodeExecution) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .node_executions
            .insert(execution.id, execution);
        Ok(())
    }

    async fn update_node_execution(&self, execution: NodeExecution) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.node_executions.contains_key(&execution.id) {
            return Err(StoreError::not_found("node execution", execution.id));
        }
        tables.node_executions.insert(execution.id, execution);
        Ok(())
    }

    async fn get_node_execution(&self, id: Uuid) -> Result<NodeExecution, StoreError> {
        self.tables
            .read()
            .await
            .node_executions
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("node execution", id))
    }

    async fn executions_of_node(&self, node_id: Uuid) -> Result<Vec<NodeExecution>, StoreError> {
        let tables = self.tables.read().await;
        let mut executions: Vec<NodeExecution> = tables
            .node_executions
            .values()
            .filter(|e| e.node_id == node_id)
            .cloned()
            .collect();
        executions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(executions)
    }

    // ------ workflow executions ------

    async fn insert_workflow_execution(
        &self,
        execution: WorkflowExecution,
    ) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .workflow_executions
            .insert(execution.id, execution);
        Ok(())
    }

    async fn update_workflow_execution(
        &self,
        execution: WorkflowExecution,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.workflow_executions.contains_key(&execution.id) {
            return Err(StoreError::not_found("workflow execution", execution.id));
        }
        tables.workflow_executions.insert(execution.id, execution);
        Ok(())
    }

    async fn get_workflow_execution(&self, id: Uuid) -> Result<WorkflowExecution, StoreError> {
        self.tables
            .read()
            .await
            .workflow_executions
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("workflow execution", id))
    }

    async fn executions_of_workflow(
        &self,
        workflow_id: Uuid,
    ) -> Result<Vec<WorkflowExecution>, StoreError> {
        let tables = self.tables.read().await;
        let mut executions: Vec<WorkflowExecution> = tables
            .workflow_executions
            .values()
            .filter(|e| e.workflow_id == workflow_id)
            .cloned()
            .collect();
        executions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(executions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionStatus;
    use nodes::NodeKind;
    use serde_json::Map;

    fn node(name: &str) -> Node {
        Node::new(name, NodeKind::ShellCommand, Map::new())
    }

    #[tokio::test]
    async fn steps_are_returned_in_ascending_order() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("wf");
        let workflow_id = workflow.id;
        store.insert_workflow(workflow).await.unwrap();

        let n = node("n");
        let node_id = n.id;
        store.insert_node(n).await.unwrap();

        // Inserted out of order on purpose.
        for order in [30, 10, 20] {
            store
                .add_step(WorkflowStep::new(workflow_id, node_id, order))
                .await
                .unwrap();
        }

        let steps = store.steps_of(workflow_id).await.unwrap();
        let orders: Vec<i32> = steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn equal_order_values_keep_insertion_order() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("wf");
        let workflow_id = workflow.id;
        store.insert_workflow(workflow).await.unwrap();

        let first = node("first");
        let second = node("second");
        let (first_id, second_id) = (first.id, second.id);
        store.insert_node(first).await.unwrap();
        store.insert_node(second).await.unwrap();

        store
            .add_step(WorkflowStep::new(workflow_id, first_id, 5))
            .await
            .unwrap();
        store
            .add_step(WorkflowStep::new(workflow_id, second_id, 5))
            .await
            .unwrap();

        let steps = store.steps_of(workflow_id).await.unwrap();
        assert_eq!(steps[0].node_id, first_id);
        assert_eq!(steps[1].node_id, second_id);
    }

    #[tokio::test]
    async fn deleting_a_node_cascades_to_executions_and_steps() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("wf");
        let workflow_id = workflow.id;
        store.insert_workflow(workflow).await.unwrap();

        let n = node("doomed");
        let node_id = n.id;
        store.insert_node(n).await.unwrap();
        store
            .add_step(WorkflowStep::new(workflow_id, node_id, 1))
            .await
            .unwrap();

        let execution = NodeExecution::started(node_id, Map::new());
        let execution_id = execution.id;
        store.insert_node_execution(execution).await.unwrap();

        store.delete_node(node_id).await.unwrap();

        assert!(store.get_node(node_id).await.is_err());
        assert!(store.get_node_execution(execution_id).await.is_err());
        assert!(store.steps_of(workflow_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_workflow_cascades_to_steps_and_executions() {
        let store = MemoryStore::new();
        let workflow = Workflow::new("wf");
        let workflow_id = workflow.id;
        store.insert_workflow(workflow).await.unwrap();

        let n = node("kept");
        let node_id = n.id;
        store.insert_node(n).await.unwrap();
        store
            .add_step(WorkflowStep::new(workflow_id, node_id, 1))
            .await
            .unwrap();

        let execution = WorkflowExecution::started(workflow_id);
        let execution_id = execution.id;
        store.insert_workflow_execution(execution).await.unwrap();

        store.delete_workflow(workflow_id).await.unwrap();

        assert!(store.get_workflow(workflow_id).await.is_err());
        assert!(store.get_workflow_execution(execution_id).await.is_err());
        // The node itself survives.
        assert!(store.get_node(node_id).await.is_ok());
    }

    #[tokio::test]
    async fn update_of_missing_execution_is_not_found() {
        let store = MemoryStore::new();
        let mut execution = NodeExecution::started(Uuid::new_v4(), Map::new());
        execution.status = ExecutionStatus::Success;
        assert!(store.update_node_execution(execution).await.is_err());
    }

    #[tokio::test]
    async fn node_history_is_newest_first() {
        let store = MemoryStore::new();
        let n = node("busy");
        let node_id = n.id;
        store.insert_node(n).await.unwrap();

        let mut older = NodeExecution::started(node_id, Map::new());
        older.start_time = older.start_time - chrono::Duration::seconds(10);
        let newer = NodeExecution::started(node_id, Map::new());
        let newer_id = newer.id;

        store.insert_node_execution(older).await.unwrap();
        store.insert_node_execution(newer).await.unwrap();

        let history = store.executions_of_node(node_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer_id);
    }
}
