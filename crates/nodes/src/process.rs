//! Shared runner for the external processes handlers spawn.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;
use tracing::debug;

use crate::{ExecutionEnv, NodeError};

/// Captured result of a finished child process.
#[derive(Debug)]
pub(crate) struct ProcessOutput {
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run `command` to completion with a wall-clock ceiling, applying the run's
/// environment context and capturing combined output.
///
/// `label` names the invocation in spawn-failure and timeout messages
/// (e.g. "git clone"). A non-zero exit is *not* an error here — callers
/// inspect `success`/`code` and format their own message.
pub(crate) async fn run_with_timeout(
    label: &str,
    mut command: Command,
    limit_secs: u64,
    env: &ExecutionEnv,
) -> Result<ProcessOutput, NodeError> {
    env.apply(&mut command);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(label, limit_secs, "spawning external process");

    let output = match time::timeout(Duration::from_secs(limit_secs), command.output()).await {
        Ok(result) => result.map_err(|e| {
            NodeError::Process(format!("Failed to start {label}: {e}"))
        })?,
        Err(_) => {
            return Err(NodeError::Timeout {
                what: label.to_string(),
                limit_secs,
            });
        }
    };

    Ok(ProcessOutput {
        code: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_exit_status() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2");

        let out = run_with_timeout("test command", cmd, 5, &ExecutionEnv::new())
            .await
            .expect("should run");

        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn ceiling_breach_is_a_timeout_error() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("sleep 5");

        let err = run_with_timeout("slow command", cmd, 1, &ExecutionEnv::new())
            .await
            .expect_err("should time out");

        assert_eq!(
            err,
            NodeError::Timeout { what: "slow command".into(), limit_secs: 1 }
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_process_error() {
        let cmd = Command::new("definitely-not-a-real-binary-7d1c");

        let err = run_with_timeout("ghost", cmd, 5, &ExecutionEnv::new())
            .await
            .expect_err("spawn should fail");

        assert!(matches!(err, NodeError::Process(msg) if msg.starts_with("Failed to start ghost")));
    }

    #[tokio::test]
    async fn env_context_reaches_the_child() {
        let mut env = ExecutionEnv::new();
        env.set("NODEFLOW_PROBE", "visible");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("printf %s \"$NODEFLOW_PROBE\"");

        let out = run_with_timeout("env probe", cmd, 5, &env)
            .await
            .expect("should run");
        assert_eq!(out.stdout, "visible");
    }
}
