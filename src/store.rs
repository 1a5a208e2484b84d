// SPDX-License-Identifier: MIT
//! Task Store — the stateful heart of the crate.
//!
//! Owns the cached task collection plus loading/error state and
//! orchestrates the Session Provider, Ledger Binding and Transaction
//! Executor. The collection is only ever a *snapshot* of ledger state as
//! of the last successful reload: no mutation is applied optimistically,
//! every add/delete triggers a full reload from the ledger as the single
//! source of truth, and a failed mutation leaves the snapshot untouched.
//!
//! Collaborators are dependency-injected so the store can be driven
//! end-to-end with fake wallet/ledger implementations in tests.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::LedgerError;
use crate::executor::{OperationResult, TransactionExecutor};
use crate::ledger::{ContractAddress, LedgerBinding, LedgerHandle};
use crate::schema::InterfaceSchema;
use crate::tasks::{Task, TaskId};
use crate::wallet::WalletProvider;

// ─── State machine ───────────────────────────────────────────────────────────

/// Lifecycle of the cached collection.
///
/// There is no terminal state — the store is long-lived and re-enterable,
/// and stays usable after any error.
#[derive(Debug, Clone, PartialEq)]
pub enum StorePhase {
    /// Nothing loaded yet.
    Idle,
    /// A reload is reading from the ledger.
    Loading,
    /// Snapshot of the ledger as of the last successful reload.
    Ready(Vec<Task>),
    /// The last reload failed; the message says why.
    Error(String),
}

/// What the presentation shell reads. The store never renders anything.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub message: Option<String>,
}

struct Inner {
    phase: StorePhase,
    /// In-flight gate: while true, all three entry points are no-ops.
    /// At most one mutating operation may run at a time — two concurrent
    /// transactions would race for the same signer nonce.
    loading: bool,
    message: Option<String>,
}

// ─── TaskStore ───────────────────────────────────────────────────────────────

/// Ledger-backed task store.
///
/// All entry points take `&self`; state lives behind a mutex that is held
/// only across state updates, never across an `.await`, so overlapping
/// calls observe the loading gate instead of blocking each other.
pub struct TaskStore {
    wallet: Arc<dyn WalletProvider>,
    address: ContractAddress,
    schema: InterfaceSchema,
    executor: TransactionExecutor,
    state: Mutex<Inner>,
}

impl TaskStore {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        address: ContractAddress,
        schema: InterfaceSchema,
    ) -> Self {
        Self {
            wallet,
            address,
            schema,
            executor: TransactionExecutor::new(),
            state: Mutex::new(Inner {
                phase: StorePhase::Idle,
                loading: false,
                message: None,
            }),
        }
    }

    /// Current view snapshot for the presentation shell.
    pub fn view(&self) -> TaskView {
        let inner = self.state.lock().unwrap();
        let tasks = match &inner.phase {
            StorePhase::Ready(tasks) => tasks.clone(),
            _ => Vec::new(),
        };
        TaskView {
            tasks,
            loading: inner.loading,
            message: inner.message.clone(),
        }
    }

    /// Current lifecycle phase (cloned snapshot).
    pub fn phase(&self) -> StorePhase {
        self.state.lock().unwrap().phase.clone()
    }

    /// Reload the collection from the ledger.
    ///
    /// No-op while another operation is in flight. A reload racing a
    /// mutation's post-confirmation reload is resolved last-writer-wins:
    /// whichever completes later fully replaces the snapshot.
    pub async fn refresh(&self) {
        if !self.try_begin(false) {
            return;
        }
        self.reload().await;
        self.end();
    }

    /// Submit an `addTask` transaction, then reload on success.
    ///
    /// Non-empty `title` and `body` are a caller-level precondition; a
    /// blank submission is simply not attempted. On failure the previous
    /// snapshot is kept, the failure message is surfaced, and no reload
    /// is triggered.
    pub async fn add_task(&self, title: &str, body: &str) {
        if title.trim().is_empty() || body.trim().is_empty() {
            debug!("blank task submission not attempted");
            return;
        }
        if !self.try_begin(true) {
            return;
        }
        let handle = match self.connect().await {
            Ok(handle) => handle,
            Err(err) => {
                self.fail(mutation_error("adding", err));
                return;
            }
        };
        match self
            .executor
            .submit(|| handle.add_task(body, title, false))
            .await
        {
            OperationResult::Success => {
                info!(title, "task added");
                self.set_message("Task added successfully!");
                self.reload().await;
                self.end();
            }
            OperationResult::Failure(reason) => {
                self.fail(format!("Error adding task: {reason}"));
            }
        }
    }

    /// Submit a `deleteTask` transaction, then reload on success.
    ///
    /// `id` is the ledger-native task id, never a position in the cached
    /// collection.
    pub async fn delete_task(&self, id: TaskId) {
        if !self.try_begin(true) {
            return;
        }
        let handle = match self.connect().await {
            Ok(handle) => handle,
            Err(err) => {
                self.fail(mutation_error("deleting", err));
                return;
            }
        };
        match self.executor.submit(|| handle.delete_task(id)).await {
            OperationResult::Success => {
                info!(id, "task deleted");
                self.set_message("Task deleted successfully!");
                self.reload().await;
                self.end();
            }
            OperationResult::Failure(reason) => {
                self.fail(format!("Error deleting task: {reason}"));
            }
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    /// Acquire a fresh session and bind the contract to it.
    ///
    /// Sessions are re-derived per ledger access rather than cached, so an
    /// account switch in the wallet between calls is picked up here.
    async fn connect(&self) -> Result<LedgerHandle, LedgerError> {
        let session = self.wallet.acquire_session().await?;
        LedgerBinding::bind(self.address.clone(), &self.schema, session)
    }

    /// Read the ledger and replace the snapshot wholesale.
    ///
    /// Does not touch the loading gate; the calling operation owns it.
    async fn reload(&self) {
        self.state.lock().unwrap().phase = StorePhase::Loading;
        let phase = match self.connect().await {
            Ok(handle) => match handle.list_my_tasks().await {
                Ok(tasks) => StorePhase::Ready(tasks),
                Err(err) => StorePhase::Error(load_error(err)),
            },
            Err(err) => StorePhase::Error(load_error(err)),
        };
        let mut inner = self.state.lock().unwrap();
        if let StorePhase::Error(msg) = &phase {
            warn!(message = %msg, "reload failed");
            inner.message = Some(msg.clone());
        }
        inner.phase = phase;
    }

    /// Close the loading gate. Returns false (caller must bail) if another
    /// operation is already in flight.
    fn try_begin(&self, clear_message: bool) -> bool {
        let mut inner = self.state.lock().unwrap();
        if inner.loading {
            debug!("operation already in flight — ignored");
            return false;
        }
        inner.loading = true;
        if clear_message {
            inner.message = None;
        }
        true
    }

    fn end(&self) {
        self.state.lock().unwrap().loading = false;
    }

    /// Surface a failure message and open the gate. The phase — and with
    /// it the previous `Ready` snapshot — is left untouched.
    fn fail(&self, message: String) {
        warn!(message = %message, "operation failed");
        let mut inner = self.state.lock().unwrap();
        inner.message = Some(message);
        inner.loading = false;
    }

    fn set_message(&self, message: &str) {
        self.state.lock().unwrap().message = Some(message.to_string());
    }
}

/// Message for a failed reload. Wallet absence keeps its verbatim text.
fn load_error(err: LedgerError) -> String {
    match err {
        LedgerError::NoWallet => err.to_string(),
        _ => format!("Error loading tasks: {err}"),
    }
}

/// Message for a mutation that failed before signing. `op` reads as
/// "adding" / "deleting".
fn mutation_error(op: &str, err: LedgerError) -> String {
    match err {
        LedgerError::NoWallet => err.to_string(),
        _ => format!("Error {op} task: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{Session, WalletProvider};
    use async_trait::async_trait;

    const ADDRESS: &str = "0xd9145CCE52D386f254917e481eB44e9943F39138";

    const SCHEMA: &str = r#"[
        {"type": "function", "name": "getMyTask"},
        {"type": "function", "name": "addTask"},
        {"type": "function", "name": "deleteTask"}
    ]"#;

    /// Fails the test if the store reaches for the wallet at all.
    struct UnreachableWallet;

    #[async_trait]
    impl WalletProvider for UnreachableWallet {
        async fn acquire_session(&self) -> Result<Session, LedgerError> {
            panic!("the wallet must not be consulted");
        }
    }

    fn store_with(wallet: Arc<dyn WalletProvider>) -> TaskStore {
        TaskStore::new(
            wallet,
            ContractAddress::new(ADDRESS).unwrap(),
            InterfaceSchema::from_json(SCHEMA).unwrap(),
        )
    }

    #[test]
    fn starts_idle_with_an_empty_view() {
        let store = store_with(Arc::new(UnreachableWallet));
        assert_eq!(store.phase(), StorePhase::Idle);
        let view = store.view();
        assert!(view.tasks.is_empty());
        assert!(!view.loading);
        assert!(view.message.is_none());
    }

    #[tokio::test]
    async fn blank_submissions_are_not_attempted() {
        let store = store_with(Arc::new(UnreachableWallet));
        store.add_task("", "body").await;
        store.add_task("title", "").await;
        store.add_task("   ", "body").await;
        assert_eq!(store.phase(), StorePhase::Idle);
        assert!(store.view().message.is_none());
    }

    struct AbsentWallet;

    #[async_trait]
    impl WalletProvider for AbsentWallet {
        async fn acquire_session(&self) -> Result<Session, LedgerError> {
            Err(LedgerError::NoWallet)
        }
    }

    #[tokio::test]
    async fn missing_wallet_surfaces_the_exact_message() {
        let store = store_with(Arc::new(AbsentWallet));
        store.refresh().await;
        assert_eq!(
            store.phase(),
            StorePhase::Error("Metamask is required.".into())
        );
        let view = store.view();
        assert_eq!(view.message.as_deref(), Some("Metamask is required."));
        assert!(!view.loading, "the gate must reopen after a failure");
    }

    #[tokio::test]
    async fn missing_wallet_during_add_keeps_the_phase() {
        let store = store_with(Arc::new(AbsentWallet));
        store.add_task("Buy milk", "desc").await;
        // No prior Ready snapshot existed, so the phase stays Idle.
        assert_eq!(store.phase(), StorePhase::Idle);
        assert_eq!(
            store.view().message.as_deref(),
            Some("Metamask is required.")
        );
    }
}
