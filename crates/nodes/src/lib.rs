//! `nodes` crate — the five built-in operation handlers and their shared
//! plumbing (configuration access, environment context, process runner).
//!
//! The engine crate dispatches execution through [`run_operation`], a single
//! exhaustive match over [`NodeKind`]. Adding a sixth kind is a compile
//! error until every match arm is updated.

pub mod config;
pub mod deps;
pub mod env;
pub mod environment;
pub mod error;
pub mod files;
pub mod git;
pub mod kind;
pub mod shell;

mod process;

pub use config::NodeConfig;
pub use env::ExecutionEnv;
pub use error::NodeError;
pub use kind::NodeKind;

/// Run one operation against an effective configuration.
///
/// Returns the handler's human-readable output on success. Every failure is
/// a [`NodeError`] whose message is suitable for storing verbatim in an
/// execution record.
pub async fn run_operation(
    kind: NodeKind,
    config: &NodeConfig,
    env: &mut ExecutionEnv,
) -> Result<String, NodeError> {
    match kind {
        NodeKind::GitClone => git::run(config, env).await,
        NodeKind::EnvSetup => environment::run(config, env),
        NodeKind::DependencyInstall => deps::run(config, env).await,
        NodeKind::ShellCommand => shell::run(config, env).await,
        NodeKind::FileOperation => files::run(config).await,
    }
}
