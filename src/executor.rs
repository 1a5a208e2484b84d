// SPDX-License-Identifier: MIT
//! Transaction Executor — submit, await finality, classify.
//!
//! One mutating ledger call passes through here: the factory performs the
//! signing and submission, [`TransactionExecutor::submit`] awaits
//! confirmation and folds every failure mode into an [`OperationResult`].
//! No retries, ever — ledger transactions are not idempotent, and a
//! retried add could create a duplicate task. A failed transaction is
//! reported once; trying again means re-invoking the whole operation.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::wallet::PendingTx;

/// Outcome of one mutating operation.
///
/// Never partially applied: either the mutation landed on the ledger and
/// will be reflected after the next reload, or it failed and the cached
/// collection is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success,
    /// Human-readable summary of the underlying error — never a raw
    /// error propagated to the caller.
    Failure(String),
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success)
    }
}

/// Drives a single transaction from signing to confirmation.
#[derive(Debug, Default)]
pub struct TransactionExecutor;

impl TransactionExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Submit a mutating call and await its on-ledger confirmation.
    ///
    /// The factory obtains the [`PendingTx`] — this is where signing
    /// happens, so it may suspend indefinitely on user wallet approval and
    /// may fail with [`LedgerError::UserRejected`] or
    /// [`LedgerError::InsufficientFunds`]. Confirmation then suspends for
    /// as long as the ledger takes; no client-side timeout is imposed.
    pub async fn submit<F, Fut>(&self, pending_tx_factory: F) -> OperationResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Box<dyn PendingTx>, LedgerError>>,
    {
        let pending = match pending_tx_factory().await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(%err, "transaction rejected before submission");
                return OperationResult::Failure(err.to_string());
            }
        };
        debug!("transaction submitted, awaiting confirmation");
        match pending.confirm().await {
            Ok(()) => {
                debug!("transaction confirmed");
                OperationResult::Success
            }
            Err(err) => {
                warn!(%err, "transaction failed to confirm");
                OperationResult::Failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedTx(Result<(), LedgerError>);

    #[async_trait]
    impl PendingTx for FixedTx {
        async fn confirm(self: Box<Self>) -> Result<(), LedgerError> {
            self.0
        }
    }

    #[tokio::test]
    async fn confirmed_transaction_is_success() {
        let executor = TransactionExecutor::new();
        let result = executor
            .submit(|| async { Ok(Box::new(FixedTx(Ok(()))) as Box<dyn PendingTx>) })
            .await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn signing_rejection_is_a_failure_with_the_reason() {
        let executor = TransactionExecutor::new();
        let result = executor
            .submit(|| async { Err::<Box<dyn PendingTx>, _>(LedgerError::UserRejected) })
            .await;
        assert_eq!(
            result,
            OperationResult::Failure("user rejected the signing request".into())
        );
    }

    #[tokio::test]
    async fn confirmation_failure_is_classified() {
        let executor = TransactionExecutor::new();
        let result = executor
            .submit(|| async {
                Ok(Box::new(FixedTx(Err(LedgerError::LedgerRevert("not task owner".into()))))
                    as Box<dyn PendingTx>)
            })
            .await;
        match result {
            OperationResult::Failure(msg) => assert!(msg.contains("not task owner")),
            OperationResult::Success => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn insufficient_funds_surfaces_human_readable_text() {
        let executor = TransactionExecutor::new();
        let result = executor
            .submit(|| async { Err::<Box<dyn PendingTx>, _>(LedgerError::InsufficientFunds) })
            .await;
        assert_eq!(
            result,
            OperationResult::Failure("insufficient funds for transaction".into())
        );
    }
}
