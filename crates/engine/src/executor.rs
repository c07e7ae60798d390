//! The node executor — runs a single node and records the attempt.
//!
//! 1. Persist a `NodeExecution` record in `running` status with the
//!    caller-supplied parameters.
//! 2. Resolve effective configuration: node defaults overridden key-by-key
//!    by the caller's parameters (caller wins).
//! 3. Dispatch on the node's kind.
//! 4. Finalize the record to `success` or `error` — on every path — and
//!    return the matching [`ExecutionResult`] variant.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, instrument};

use nodes::{run_operation, ExecutionEnv, NodeConfig};
use store::{Node, NodeExecution, RecordStore};

use crate::ExecutionResult;

/// Runs single nodes against the record store.
///
/// Cheap to clone; holds only the shared store handle.
#[derive(Clone)]
pub struct NodeExecutor {
    store: Arc<dyn RecordStore>,
}

impl NodeExecutor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Execute `node` with a fresh environment context.
    ///
    /// Never returns an error to the caller: every failure path — validation,
    /// process exit, timeout, filesystem fault, even a store fault — comes
    /// back as [`ExecutionResult::Failure`].
    pub async fn execute(&self, node: &Node, parameters: &Map<String, Value>) -> ExecutionResult {
        let mut env = ExecutionEnv::new();
        self.execute_with_env(node, parameters, &mut env).await
    }

    /// Execute `node` inside an existing run environment.
    ///
    /// The workflow engine uses this so `env_setup` assignments made by one
    /// step are visible to the steps after it.
    #[instrument(skip(self, parameters, env), fields(node_id = %node.id, node = %node.name, kind = %node.kind))]
    pub async fn execute_with_env(
        &self,
        node: &Node,
        parameters: &Map<String, Value>,
        env: &mut ExecutionEnv,
    ) -> ExecutionResult {
        let mut record = NodeExecution::started(node.id, parameters.clone());

        if let Err(e) = self.store.insert_node_execution(record.clone()).await {
            error!("could not create execution record: {e}");
            return ExecutionResult::failure(e.to_string());
        }

        let config = NodeConfig::merged(&node.configuration, parameters);

        // The record reaches a terminal status on both arms before anything
        // is returned.
        match run_operation(node.kind, &config, env).await {
            Ok(output) => {
                record.complete(output.clone());
                if let Err(e) = self.store.update_node_execution(record).await {
                    error!("could not finalize execution record: {e}");
                    return ExecutionResult::failure(e.to_string());
                }

                info!("node '{}' executed successfully", node.name);
                ExecutionResult::success(output)
            }
            Err(fault) => {
                let message = fault.to_string();
                record.fail(message.clone());
                if let Err(e) = self.store.update_node_execution(record).await {
                    error!("could not finalize execution record: {e}");
                }

                error!("node '{}' execution failed: {message}", node.name);
                ExecutionResult::failure(message)
            }
        }
    }
}
