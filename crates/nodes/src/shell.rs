//! `shell_command` — run an arbitrary command line through the shell.

use tokio::process::Command;
use tracing::info;

use crate::process::run_with_timeout;
use crate::{ExecutionEnv, NodeConfig, NodeError};

/// Default wall-clock ceiling; overridable via the `timeout` key.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

const DEFAULT_WORKING_DIR: &str = ".";

pub async fn run(config: &NodeConfig, env: &ExecutionEnv) -> Result<String, NodeError> {
    let command = config
        .non_empty_str("command")
        .ok_or_else(|| NodeError::Validation("Command is required".into()))?;
    let working_dir = config.str_or("working_dir", DEFAULT_WORKING_DIR);
    let timeout_secs = config.u64_or("timeout", DEFAULT_TIMEOUT_SECS);

    info!(command, working_dir, timeout_secs, "running shell command");

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).current_dir(working_dir);

    let out = run_with_timeout(command, cmd, timeout_secs, env).await?;
    if !out.success {
        return Err(NodeError::Process(format!(
            "Command failed with exit code {}: {}",
            out.code.unwrap_or(-1),
            out.stderr
        )));
    }

    Ok(format!(
        "Command executed successfully\nSTDOUT:\n{}\nSTDERR:\n{}",
        out.stdout, out.stderr
    ))
}
