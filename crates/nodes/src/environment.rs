//! `env_setup` — assign environment variables for the rest of the run.
//!
//! Assignments land in the run's [`ExecutionEnv`], not the real process
//! environment; later handlers apply them to the children they spawn.

use tracing::info;

use crate::config::value_to_string;
use crate::{ExecutionEnv, NodeConfig, NodeError};

pub fn run(config: &NodeConfig, env: &mut ExecutionEnv) -> Result<String, NodeError> {
    let mut lines = Vec::new();

    if let Some(vars) = config.object("environment_variables") {
        for (key, value) in vars {
            let value = value_to_string(value);
            env.set(key.clone(), value.clone());
            lines.push(format!("Set {key}={value}"));
        }
    }

    info!(assigned = lines.len(), "environment setup complete");

    if lines.is_empty() {
        Ok("No environment variables to set".into())
    } else {
        Ok(lines.join("\n"))
    }
}
