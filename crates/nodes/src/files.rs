//! `file_operation` — create, copy, move, or delete files and directories.

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::{NodeConfig, NodeError};

pub async fn run(config: &NodeConfig) -> Result<String, NodeError> {
    let operation = config
        .str("operation")
        .ok_or_else(|| NodeError::Validation("File operation is required".into()))?;

    match operation {
        "create" => create(config).await,
        "copy" => copy(config).await,
        "move" => rename(config).await,
        "delete" => delete(config).await,
        other => Err(NodeError::Validation(format!(
            "Unsupported file operation: {other}"
        ))),
    }
}

async fn create(config: &NodeConfig) -> Result<String, NodeError> {
    // `content` is required but may be the empty string; `destination` may not.
    let (destination, content) = match (config.non_empty_str("destination"), config.str("content"))
    {
        (Some(d), Some(c)) => (d, c),
        _ => {
            return Err(NodeError::Validation(
                "Destination and content are required for create operation".into(),
            ));
        }
    };

    if let Some(parent) = Path::new(destination).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(|e| {
                NodeError::Filesystem(format!(
                    "Failed to create parent directory for {destination}: {e}"
                ))
            })?;
        }
    }

    fs::write(destination, content)
        .await
        .map_err(|e| NodeError::Filesystem(format!("Failed to create {destination}: {e}")))?;

    info!(destination, "created file");
    Ok(format!("Created file: {destination}"))
}

async fn copy(config: &NodeConfig) -> Result<String, NodeError> {
    let (source, destination) = source_and_destination(config, "copy")?;

    fs::copy(source, destination).await.map_err(|e| {
        NodeError::Filesystem(format!("Failed to copy {source} to {destination}: {e}"))
    })?;

    info!(source, destination, "copied file");
    Ok(format!("Copied {source} to {destination}"))
}

async fn rename(config: &NodeConfig) -> Result<String, NodeError> {
    let (source, destination) = source_and_destination(config, "move")?;

    fs::rename(source, destination).await.map_err(|e| {
        NodeError::Filesystem(format!("Failed to move {source} to {destination}: {e}"))
    })?;

    info!(source, destination, "moved file");
    Ok(format!("Moved {source} to {destination}"))
}

async fn delete(config: &NodeConfig) -> Result<String, NodeError> {
    let source = config
        .non_empty_str("source")
        .ok_or_else(|| NodeError::Validation("Source is required for delete operation".into()))?;

    let path = Path::new(source);
    if path.is_file() {
        fs::remove_file(path)
            .await
            .map_err(|e| NodeError::Filesystem(format!("Failed to delete {source}: {e}")))?;
        info!(source, "deleted file");
        Ok(format!("Deleted file: {source}"))
    } else if path.is_dir() {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| NodeError::Filesystem(format!("Failed to delete {source}: {e}")))?;
        info!(source, "deleted directory");
        Ok(format!("Deleted directory: {source}"))
    } else {
        Err(NodeError::Validation(format!("Path does not exist: {source}")))
    }
}

fn source_and_destination<'a>(
    config: &'a NodeConfig,
    operation: &str,
) -> Result<(&'a str, &'a str), NodeError> {
    match (config.non_empty_str("source"), config.non_empty_str("destination")) {
        (Some(s), Some(d)) => Ok((s, d)),
        _ => Err(NodeError::Validation(format!(
            "Source and destination are required for {operation} operation"
        ))),
    }
}
