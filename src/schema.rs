// SPDX-License-Identifier: MIT
//! Contract interface schema.
//!
//! The ledger contract ships an interface description as a JSON array of
//! entries (the `abi.json` convention). The binding only cares about which
//! *function* names exist — argument encoding is owned by the signing
//! transport — so the parse here is deliberately loose: unknown fields are
//! ignored and non-function entries (constructors, events) are kept but
//! never matched by [`InterfaceSchema::has_method`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

// ─── Schema entries ──────────────────────────────────────────────────────────

/// One input parameter of a schema entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One entry of the interface description.
///
/// Constructors and events carry no `name`, hence the default.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<ParamDescriptor>,
}

// ─── InterfaceSchema ─────────────────────────────────────────────────────────

/// Parsed contract interface description.
#[derive(Debug, Clone)]
pub struct InterfaceSchema {
    entries: Vec<MethodDescriptor>,
}

impl InterfaceSchema {
    /// Parse a JSON interface description (an array of entries).
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<MethodDescriptor> =
            serde_json::from_str(raw).context("malformed interface schema")?;
        Ok(Self { entries })
    }

    /// Read and parse an interface description file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read interface schema {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// True if the schema exposes a callable function with this name.
    pub fn has_method(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == "function" && e.name == name)
    }

    /// The function entry with this name, if any.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.entries
            .iter()
            .find(|e| e.kind == "function" && e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"[
        {"type": "constructor", "inputs": []},
        {"type": "function", "name": "getMyTask", "inputs": [], "outputs": [], "stateMutability": "view"},
        {"type": "function", "name": "addTask",
         "inputs": [{"name": "taskText", "type": "string"},
                    {"name": "taskTitle", "type": "string"},
                    {"name": "isDone", "type": "bool"}]},
        {"type": "function", "name": "deleteTask", "inputs": [{"name": "taskId", "type": "uint256"}]},
        {"type": "event", "name": "TaskAdded", "inputs": []}
    ]"#;

    #[test]
    fn finds_function_entries() {
        let schema = InterfaceSchema::from_json(SCHEMA).unwrap();
        assert!(schema.has_method("getMyTask"));
        assert!(schema.has_method("addTask"));
        assert!(schema.has_method("deleteTask"));
    }

    #[test]
    fn events_and_constructors_are_not_methods() {
        let schema = InterfaceSchema::from_json(SCHEMA).unwrap();
        assert!(!schema.has_method("TaskAdded"));
        assert!(!schema.has_method(""));
    }

    #[test]
    fn method_exposes_input_descriptors() {
        let schema = InterfaceSchema::from_json(SCHEMA).unwrap();
        let add = schema.method("addTask").unwrap();
        assert_eq!(add.inputs.len(), 3);
        assert_eq!(add.inputs[0].name, "taskText");
        assert_eq!(add.inputs[2].kind, "bool");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(InterfaceSchema::from_json("{not json").is_err());
    }
}
