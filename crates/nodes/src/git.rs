//! `git_clone` — clone a repository at a branch into a target directory.

use tokio::process::Command;
use tracing::info;

use crate::process::run_with_timeout;
use crate::{ExecutionEnv, NodeConfig, NodeError};

/// Wall-clock ceiling for the clone invocation.
const CLONE_TIMEOUT_SECS: u64 = 300;

const DEFAULT_BRANCH: &str = "main";
const DEFAULT_TARGET_DIR: &str = "./cloned_repo";

pub async fn run(config: &NodeConfig, env: &ExecutionEnv) -> Result<String, NodeError> {
    let url = config
        .non_empty_str("url")
        .ok_or_else(|| NodeError::Validation("Git URL is required".into()))?;
    let branch = config.str_or("branch", DEFAULT_BRANCH);
    let target_dir = config.str_or("target_dir", DEFAULT_TARGET_DIR);

    info!(url, branch, target_dir, "cloning repository");

    let mut cmd = Command::new("git");
    cmd.args(["clone", "--branch", branch, url, target_dir]);

    let out = run_with_timeout("git clone", cmd, CLONE_TIMEOUT_SECS, env).await?;
    if !out.success {
        return Err(NodeError::Process(format!("Git clone failed: {}", out.stderr)));
    }

    Ok(format!(
        "Successfully cloned {url} (branch: {branch}) to {target_dir}\n{}",
        out.stdout
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: serde_json::Value) -> NodeConfig {
        NodeConfig::new(value.as_object().unwrap().clone())
    }

    #[tokio::test]
    async fn missing_url_fails_validation() {
        let cfg = config(json!({ "branch": "main" }));
        let err = run(&cfg, &ExecutionEnv::new()).await.unwrap_err();
        assert_eq!(err, NodeError::Validation("Git URL is required".into()));
    }

    #[tokio::test]
    async fn empty_url_fails_validation() {
        let cfg = config(json!({ "url": "" }));
        let err = run(&cfg, &ExecutionEnv::new()).await.unwrap_err();
        assert_eq!(err, NodeError::Validation("Git URL is required".into()));
    }

    #[tokio::test]
    async fn clone_of_nonexistent_local_repo_reports_git_stderr() {
        let scratch = tempfile::tempdir().unwrap();
        let target = scratch.path().join("dest");
        let cfg = config(json!({
            "url": scratch.path().join("no-such-repo").to_str().unwrap(),
            "target_dir": target.to_str().unwrap(),
        }));

        let err = run(&cfg, &ExecutionEnv::new()).await.unwrap_err();
        match err {
            NodeError::Process(msg) => assert!(msg.starts_with("Git clone failed:"), "{msg}"),
            other => panic!("expected process error, got {other:?}"),
        }
    }
}
