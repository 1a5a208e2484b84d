// SPDX-License-Identifier: MIT
//! Task row type as returned by the ledger contract.

use serde::{Deserialize, Serialize};

/// Ledger-assigned task identifier. Unique and immutable once created.
///
/// Always the authoritative handle for deletion — never a positional index
/// into the cached collection, which the ledger is free to reorder.
pub type TaskId = u64;

/// One task record, owned by the ledger.
///
/// The Task Store only ever holds read-only cached copies of these; the
/// field names follow the contract's camelCase row shape on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "taskTitle")]
    pub title: String,
    #[serde(rename = "taskText")]
    pub body: String,
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_contract_row_shape() {
        let row = r#"{"id": 1, "taskTitle": "Buy milk", "taskText": "desc", "done": false}"#;
        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.body, "desc");
        assert!(!task.done);
    }

    #[test]
    fn serializes_back_to_camel_case() {
        let task = Task {
            id: 7,
            title: "t".into(),
            body: "b".into(),
            done: true,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["taskTitle"], "t");
        assert_eq!(value["taskText"], "b");
    }
}
