// SPDX-License-Identifier: MIT
//! Ledger Binding — a callable handle over the task contract.
//!
//! [`LedgerBinding::bind`] wraps a fixed contract address plus interface
//! schema into a [`LedgerHandle`] bound to one [`Session`]. Binding is pure
//! construction: the schema is checked for the three required methods and
//! no network I/O happens until a handle operation is awaited.

use serde_json::json;
use tracing::debug;

use crate::error::LedgerError;
use crate::schema::InterfaceSchema;
use crate::tasks::{Task, TaskId};
use crate::wallet::{PendingTx, Session};

/// The full contract surface this crate depends on. Nothing else is
/// required of the ledger.
pub const REQUIRED_METHODS: [&str; 3] = ["getMyTask", "addTask", "deleteTask"];

// ─── ContractAddress ─────────────────────────────────────────────────────────

/// A validated ledger contract address (`0x` + 40 hex digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(raw: &str) -> Result<Self, LedgerError> {
        let raw = raw.trim();
        let hex = raw
            .strip_prefix("0x")
            .ok_or_else(|| LedgerError::InvalidAddress(raw.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LedgerError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── LedgerBinding ───────────────────────────────────────────────────────────

/// Constructor for [`LedgerHandle`]s.
pub struct LedgerBinding;

impl LedgerBinding {
    /// Bind an address + schema to a session.
    ///
    /// Fails with [`LedgerError::MissingMethod`] if the schema does not
    /// expose every method in [`REQUIRED_METHODS`]; no handle is
    /// constructed in that case.
    pub fn bind(
        address: ContractAddress,
        schema: &InterfaceSchema,
        session: Session,
    ) -> Result<LedgerHandle, LedgerError> {
        for method in REQUIRED_METHODS {
            if !schema.has_method(method) {
                return Err(LedgerError::MissingMethod(method));
            }
        }
        debug!(address = %address, account = session.account(), "bound ledger handle");
        Ok(LedgerHandle { address, session })
    }
}

// ─── LedgerHandle ────────────────────────────────────────────────────────────

/// The task-management surface of the contract, bound to one session.
pub struct LedgerHandle {
    address: ContractAddress,
    session: Session,
}

impl LedgerHandle {
    /// Read the caller's tasks. No transaction; order is ledger-defined.
    pub async fn list_my_tasks(&self) -> Result<Vec<Task>, LedgerError> {
        let rows = self
            .session
            .signer()
            .call(self.address.as_str(), "getMyTask", json!([]))
            .await?;
        let tasks: Vec<Task> = serde_json::from_value(rows)
            .map_err(|e| LedgerError::Network(format!("malformed task row: {e}")))?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Submit an `addTask` transaction.
    ///
    /// Contract argument order is `(text, title, done)` — body first.
    pub async fn add_task(
        &self,
        body: &str,
        title: &str,
        done: bool,
    ) -> Result<Box<dyn PendingTx>, LedgerError> {
        self.session
            .signer()
            .send_transaction(self.address.as_str(), "addTask", json!([body, title, done]))
            .await
    }

    /// Submit a `deleteTask` transaction for the ledger-native task id.
    pub async fn delete_task(&self, id: TaskId) -> Result<Box<dyn PendingTx>, LedgerError> {
        self.session
            .signer()
            .send_transaction(self.address.as_str(), "deleteTask", json!([id]))
            .await
    }
}
