//! The environment context shared by every handler invocation in one run.
//!
//! The `env_setup` handler writes assignments here instead of into the real
//! process environment; the process-spawning handlers apply the context to
//! each child they start. Concurrent runs therefore cannot observe each
//! other's variables.

use std::collections::BTreeMap;

/// Mutable set of environment variables scoped to a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionEnv {
    vars: BTreeMap<String, String>,
}

impl ExecutionEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a variable. Later assignments to the same key overwrite.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Iterate assignments in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply every assignment to a child process about to be spawned.
    pub fn apply(&self, command: &mut tokio::process::Command) {
        for (key, value) in self.iter() {
            command.env(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut env = ExecutionEnv::new();
        assert!(env.is_empty());

        env.set("API_KEY", "secret");
        env.set("API_KEY", "rotated");
        assert_eq!(env.get("API_KEY"), Some("rotated"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut env = ExecutionEnv::new();
        env.set("B", "2");
        env.set("A", "1");

        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }
}
