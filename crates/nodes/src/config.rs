//! Effective configuration handed to a handler.
//!
//! A node carries a stored configuration mapping; the caller supplies a
//! parameter mapping at execution time. [`NodeConfig::merged`] resolves the
//! two key-by-key with the caller winning on collision — keys present on
//! only one side are preserved as-is.

use serde_json::{Map, Value};

/// String-keyed JSON configuration with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeConfig(Map<String, Value>);

impl NodeConfig {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Node defaults overridden key-by-key by caller parameters.
    pub fn merged(defaults: &Map<String, Value>, overrides: &Map<String, Value>) -> Self {
        let mut map = defaults.clone();
        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value at `key`, if present and a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The string at `key`, or `default` when absent or not a string.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// The value at `key` when it is a non-empty string.
    ///
    /// Required parameters treat an empty string the same as an absent key,
    /// so `{"url": ""}` fails validation instead of reaching the handler's
    /// side effects.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str(key).filter(|s| !s.is_empty())
    }

    /// The unsigned integer at `key`, or `default` when absent or not one.
    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.0.get(key).and_then(Value::as_u64).unwrap_or(default)
    }

    /// The JSON object at `key`, if present and an object.
    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// The array at `key` rendered as strings (non-string entries keep
    /// their JSON representation), empty when absent.
    pub fn string_array(&self, key: &str) -> Vec<String> {
        match self.0.get(key).and_then(Value::as_array) {
            Some(items) => items.iter().map(value_to_string).collect(),
            None => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for NodeConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Render a JSON value the way it should appear in output and environment
/// assignments: strings unquoted, everything else as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn caller_wins_on_key_collision() {
        let defaults = map(json!({ "command": "echo default", "working_dir": "/tmp" }));
        let overrides = map(json!({ "command": "echo override" }));

        let config = NodeConfig::merged(&defaults, &overrides);
        assert_eq!(config.str("command"), Some("echo override"));
        // Keys present on only one side survive the merge.
        assert_eq!(config.str("working_dir"), Some("/tmp"));
    }

    #[test]
    fn unresolved_override_keys_are_preserved() {
        let defaults = map(json!({ "url": "https://example.com/repo.git" }));
        let overrides = map(json!({ "branch": "dev" }));

        let config = NodeConfig::merged(&defaults, &overrides);
        assert_eq!(config.str("url"), Some("https://example.com/repo.git"));
        assert_eq!(config.str("branch"), Some("dev"));
    }

    #[test]
    fn typed_accessors_fall_back_to_defaults() {
        let config = NodeConfig::new(map(json!({ "timeout": 60, "name": 7 })));
        assert_eq!(config.u64_or("timeout", 300), 60);
        assert_eq!(config.u64_or("missing", 300), 300);
        // Wrong shape behaves like absence.
        assert_eq!(config.str_or("name", "fallback"), "fallback");
    }

    #[test]
    fn non_empty_str_treats_empty_as_absent() {
        let config = NodeConfig::new(map(json!({ "url": "", "branch": "main" })));
        assert_eq!(config.non_empty_str("url"), None);
        assert_eq!(config.non_empty_str("branch"), Some("main"));
        assert_eq!(config.non_empty_str("missing"), None);
    }

    #[test]
    fn string_array_stringifies_mixed_entries() {
        let config = NodeConfig::new(map(json!({ "packages": ["requests", 42] })));
        assert_eq!(config.string_array("packages"), vec!["requests", "42"]);
        assert!(config.string_array("missing").is_empty());
    }
}
