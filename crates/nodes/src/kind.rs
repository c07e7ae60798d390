//! The closed set of operation kinds a node can have.

use serde::{Deserialize, Serialize};

/// What a node does when executed.
///
/// Serialized with the snake_case names clients and stored configurations
/// use (`git_clone`, `env_setup`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Clone a git repository at a branch into a target directory.
    GitClone,
    /// Assign environment variables for the rest of the run.
    EnvSetup,
    /// Install dependencies from a requirements file and/or a package list.
    DependencyInstall,
    /// Run an arbitrary shell command.
    ShellCommand,
    /// Create, copy, move, or delete files and directories.
    FileOperation,
}

impl NodeKind {
    /// All kinds, in a stable order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::GitClone,
        NodeKind::EnvSetup,
        NodeKind::DependencyInstall,
        NodeKind::ShellCommand,
        NodeKind::FileOperation,
    ];

    /// The snake_case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitClone => "git_clone",
            Self::EnvSetup => "env_setup",
            Self::DependencyInstall => "dependency_install",
            Self::ShellCommand => "shell_command",
            Self::FileOperation => "file_operation",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git_clone"          => Ok(Self::GitClone),
            "env_setup"          => Ok(Self::EnvSetup),
            "dependency_install" => Ok(Self::DependencyInstall),
            "shell_command"      => Ok(Self::ShellCommand),
            "file_operation"     => Ok(Self::FileOperation),
            other                => Err(format!("Unsupported node type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in NodeKind::ALL {
            let parsed: NodeKind = kind.as_str().parse().expect("wire name should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&NodeKind::GitClone).unwrap();
        assert_eq!(json, r#""git_clone""#);

        let kind: NodeKind = serde_json::from_str(r#""file_operation""#).unwrap();
        assert_eq!(kind, NodeKind::FileOperation);
    }

    #[test]
    fn unknown_wire_name_is_rejected() {
        let err = "docker_run".parse::<NodeKind>().unwrap_err();
        assert!(err.contains("Unsupported node type"));
    }
}
