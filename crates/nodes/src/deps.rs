//! `dependency_install` — install from a requirements file and/or a list of
//! individual packages via pip or npm.

use tokio::process::Command;
use tracing::info;

use crate::process::run_with_timeout;
use crate::{ExecutionEnv, NodeConfig, NodeError};

/// Ceiling for a full requirements-file install.
const REQUIREMENTS_TIMEOUT_SECS: u64 = 600;
/// Ceiling for each individual package install.
const PACKAGE_TIMEOUT_SECS: u64 = 300;

const DEFAULT_PACKAGE_MANAGER: &str = "pip";

pub async fn run(config: &NodeConfig, env: &ExecutionEnv) -> Result<String, NodeError> {
    let package_manager = config.str_or("package_manager", DEFAULT_PACKAGE_MANAGER);
    let requirements_file = config.non_empty_str("requirements_file");
    let packages = config.string_array("packages");

    let mut lines = Vec::new();

    if let Some(file) = requirements_file {
        let cmd = match package_manager {
            "pip" => {
                let mut c = Command::new("pip");
                c.args(["install", "-r", file]);
                c
            }
            "npm" => {
                let mut c = Command::new("npm");
                c.arg("install");
                c
            }
            other => {
                return Err(NodeError::Validation(format!(
                    "Unsupported package manager: {other}"
                )));
            }
        };

        let out = run_with_timeout(
            &format!("{package_manager} install"),
            cmd,
            REQUIREMENTS_TIMEOUT_SECS,
            env,
        )
        .await?;
        if !out.success {
            return Err(NodeError::Process(format!(
                "Dependency installation failed: {}",
                out.stderr
            )));
        }

        info!(file, package_manager, "installed requirements file");
        lines.push(format!("Installed dependencies from {file}"));
        lines.push(out.stdout);
    }

    for package in &packages {
        let mut cmd = match package_manager {
            "pip" => Command::new("pip"),
            "npm" => Command::new("npm"),
            other => {
                return Err(NodeError::Validation(format!(
                    "Unsupported package manager: {other}"
                )));
            }
        };
        cmd.arg("install").arg(package);

        let out = run_with_timeout(
            &format!("{package_manager} install {package}"),
            cmd,
            PACKAGE_TIMEOUT_SECS,
            env,
        )
        .await?;
        if !out.success {
            return Err(NodeError::Process(format!(
                "Failed to install {package}: {}",
                out.stderr
            )));
        }

        info!(package, package_manager, "installed package");
        lines.push(format!("Installed {package}"));
    }

    if lines.is_empty() {
        Ok("No packages to install".into())
    } else {
        Ok(lines.join("\n"))
    }
}
