//! The workflow engine — runs an ordered list of steps fail-fast.
//!
//! State machine of the `WorkflowExecution` record:
//! `running → success | error`, with the 1-based `current_step` cursor
//! persisted before each step is invoked. The terminal state is entered
//! exactly once: after the last step succeeds, immediately after the first
//! step fails, or when an unexpected fault is caught at the top level.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, instrument};
use uuid::Uuid;

use nodes::ExecutionEnv;
use store::{RecordStore, StoreError, Workflow, WorkflowExecution};

use crate::{EngineError, ExecutionResult, NodeExecutor, RunResult};

/// Runs workflows step by step through a [`NodeExecutor`].
pub struct WorkflowEngine {
    store: Arc<dyn RecordStore>,
    executor: NodeExecutor,
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let executor = NodeExecutor::new(Arc::clone(&store));
        Self { store, executor }
    }

    /// Run every step of `workflow` in ascending `order`, stopping at the
    /// first failure.
    ///
    /// The caller's `parameters` override each step's own parameters
    /// key-by-key, reapplied at every step.
    ///
    /// # Errors
    /// Returns `Err` only when the initial `WorkflowExecution` record cannot
    /// be created — there is no execution id to report at that point. Every
    /// later fault is folded into the record and returned as
    /// [`ExecutionResult::Failure`].
    #[instrument(skip(self, parameters), fields(workflow_id = %workflow.id, workflow = %workflow.name))]
    pub async fn run(
        &self,
        workflow: &Workflow,
        parameters: &Map<String, Value>,
    ) -> Result<RunResult, EngineError> {
        let mut record = WorkflowExecution::started(workflow.id);
        self.store.insert_workflow_execution(record.clone()).await?;
        let execution_id = record.id;

        info!("starting execution of workflow '{}'", workflow.name);

        let result = match self.drive(workflow.id, parameters, &mut record).await {
            Ok(result) => result,
            Err(fault) => {
                // Fault outside any step's own failure path (e.g. the store
                // failed while recording progress). Fold it into the record.
                let message = fault.to_string();
                error!(
                    "workflow '{}' failed with unexpected error: {message}",
                    workflow.name
                );
                let partial_log = record.output.clone().unwrap_or_default();
                record.fail(message.clone(), partial_log);
                if let Err(e) = self.store.update_workflow_execution(record).await {
                    error!("could not finalize workflow execution record: {e}");
                }
                ExecutionResult::failure(message)
            }
        };

        Ok(RunResult { execution_id, result })
    }

    /// Look up a run's execution record; `None` when the id is unknown.
    pub async fn get_execution_status(
        &self,
        execution_id: Uuid,
    ) -> Result<Option<WorkflowExecution>, EngineError> {
        match self.store.get_workflow_execution(execution_id).await {
            Ok(execution) => Ok(Some(execution)),
            Err(StoreError::NotFound { .. }) => Ok(None),
        }
    }

    async fn drive(
        &self,
        workflow_id: Uuid,
        parameters: &Map<String, Value>,
        record: &mut WorkflowExecution,
    ) -> Result<ExecutionResult, StoreError> {
        let steps = self.store.steps_of(workflow_id).await?;
        let total = steps.len();
        let mut log: Vec<String> = Vec::new();
        // One environment context per run, shared by every step.
        let mut env = ExecutionEnv::new();

        for (index, step) in steps.iter().enumerate() {
            let step_number = (index + 1) as u32;

            // Advance the cursor before invoking the step, so a crash
            // mid-step still shows which one was in flight.
            record.current_step = step_number;
            record.output = Some(log.join("\n"));
            self.store.update_workflow_execution(record.clone()).await?;

            let node = self.store.get_node(step.node_id).await?;
            info!(
                "executing step {step_number}/{total}: {} ({})",
                node.name, node.kind
            );

            // Step defaults < caller override, reapplied at every step.
            let mut resolved = step.parameters.clone();
            for (key, value) in parameters {
                resolved.insert(key.clone(), value.clone());
            }

            let step_result = self
                .executor
                .execute_with_env(&node, &resolved, &mut env)
                .await;

            match step_result {
                ExecutionResult::Success { output } => {
                    log.push(format!("Step {step_number} ({}): SUCCESS", node.name));
                    log.push(output);
                    log.push(String::new());
                }
                ExecutionResult::Failure { error } => {
                    let message =
                        format!("Step {step_number} ({}) failed: {error}", node.name);
                    log.push(message.clone());

                    record.fail(message.clone(), log.join("\n"));
                    self.store.update_workflow_execution(record.clone()).await?;

                    error!("workflow failed at step {step_number}");
                    return Ok(ExecutionResult::failure(message));
                }
            }
        }

        let output = log.join("\n");
        record.complete(output.clone());
        self.store.update_workflow_execution(record.clone()).await?;

        info!("workflow completed successfully");
        Ok(ExecutionResult::success(output))
    }
}
