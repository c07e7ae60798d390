//! `nodeflow` CLI entry-point.
//!
//! Available sub-commands:
//! - `run-node`     — execute a single node definition from a JSON file.
//! - `run-workflow` — execute a workflow definition from a JSON file.
//! - `validate`     — parse a workflow definition and print its step order.
//!
//! Definitions run against an in-memory record store; the per-step and
//! per-run history is printed rather than kept.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use engine::{ExecutionResult, NodeExecutor, WorkflowEngine};
use nodes::NodeKind;
use store::{MemoryStore, Node, RecordStore, Workflow, WorkflowStep};

#[derive(Parser)]
#[command(name = "nodeflow", about = "Sequential node and workflow runner", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a single node definition.
    RunNode {
        /// Path to the node JSON file.
        #[arg(long)]
        file: PathBuf,
        /// JSON object of parameters overriding the node's configuration.
        #[arg(long)]
        params: Option<String>,
    },
    /// Execute a workflow definition, step by step.
    RunWorkflow {
        /// Path to the workflow JSON file.
        #[arg(long)]
        file: PathBuf,
        /// JSON object of parameters applied on top of every step.
        #[arg(long)]
        params: Option<String>,
    },
    /// Parse a workflow definition and print the resolved step order.
    Validate {
        /// Path to the workflow JSON file.
        path: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Definition-file shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct NodeFile {
    name: String,
    kind: NodeKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    configuration: Map<String, Value>,
}

#[derive(Deserialize)]
struct WorkflowFile {
    name: String,
    #[serde(default)]
    description: Option<String>,
    steps: Vec<StepFile>,
}

#[derive(Deserialize)]
struct StepFile {
    order: i32,
    #[serde(default)]
    parameters: Map<String, Value>,
    node: NodeFile,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn parse_params(params: Option<String>) -> Result<Map<String, Value>> {
    match params {
        None => Ok(Map::new()),
        Some(raw) => {
            let value: Value = serde_json::from_str(&raw).context("--params is not valid JSON")?;
            value
                .as_object()
                .cloned()
                .context("--params must be a JSON object")
        }
    }
}

fn build_node(file: NodeFile) -> Node {
    let mut node = Node::new(file.name, file.kind, file.configuration);
    node.description = file.description;
    node
}

/// Seed the store with the workflow, its nodes, and its steps.
async fn seed_workflow(store: &MemoryStore, file: WorkflowFile) -> Result<Workflow> {
    let mut workflow = Workflow::new(file.name);
    workflow.description = file.description;
    store.insert_workflow(workflow.clone()).await?;

    for step_file in file.steps {
        let node = build_node(step_file.node);
        let node_id = node.id;
        store.insert_node(node).await?;

        let mut step = WorkflowStep::new(workflow.id, node_id, step_file.order);
        step.parameters = step_file.parameters;
        store.add_step(step).await?;
    }

    Ok(workflow)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::RunNode { file, params } => {
            let definition: NodeFile = read_json(&file)?;
            let params = parse_params(params)?;

            let store = Arc::new(MemoryStore::new());
            let node = build_node(definition);
            store.insert_node(node.clone()).await?;

            info!("executing node '{}' ({})", node.name, node.kind);
            let executor = NodeExecutor::new(store);

            match executor.execute(&node, &params).await {
                ExecutionResult::Success { output } => {
                    println!("{output}");
                }
                ExecutionResult::Failure { error } => {
                    eprintln!("Node execution failed: {error}");
                    std::process::exit(1);
                }
            }
        }

        Command::RunWorkflow { file, params } => {
            let definition: WorkflowFile = read_json(&file)?;
            let params = parse_params(params)?;

            let store = Arc::new(MemoryStore::new());
            let workflow = seed_workflow(&store, definition).await?;

            let engine = WorkflowEngine::new(store);
            let run = engine.run(&workflow, &params).await?;

            let status = engine
                .get_execution_status(run.execution_id)
                .await?
                .context("execution record vanished")?;

            match run.result {
                ExecutionResult::Success { output } => {
                    println!("{output}");
                    println!("Workflow finished: {} ({} steps)", status.status, status.current_step);
                }
                ExecutionResult::Failure { error } => {
                    if let Some(log) = status.output {
                        println!("{log}");
                    }
                    eprintln!("Workflow failed at step {}: {error}", status.current_step);
                    std::process::exit(1);
                }
            }
        }

        Command::Validate { path } => {
            let definition: WorkflowFile = read_json(&path)?;

            let mut steps: Vec<(i32, String, NodeKind)> = definition
                .steps
                .into_iter()
                .map(|s| (s.order, s.node.name, s.node.kind))
                .collect();
            steps.sort_by_key(|(order, _, _)| *order);

            println!("Workflow '{}' is valid. Step order:", definition.name);
            for (i, (order, name, kind)) in steps.iter().enumerate() {
                println!("  {}. {name} ({kind}) [order {order}]", i + 1);
            }
        }
    }

    Ok(())
}
