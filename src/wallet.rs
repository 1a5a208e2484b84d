// SPDX-License-Identifier: MIT
//! Session Provider — the signing surface of the wallet integration.
//!
//! The Task Store never talks to a wallet directly. It asks a
//! [`WalletProvider`] for a fresh [`Session`] before every ledger access,
//! and the session carries the [`LedgerSigner`] that actually performs
//! reads and signed submissions. Sessions are deliberately *not* cached:
//! re-deriving one per access tolerates the user switching accounts in
//! the wallet between calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::LedgerError;

// ─── WalletProvider ──────────────────────────────────────────────────────────

/// Obtains an authenticated signing session from the user's wallet.
///
/// Acquisition may prompt the user for approval — an external,
/// possibly-cancellable human-in-the-loop step. When no wallet integration
/// is detected in the host environment, implementations must fail
/// deterministically and immediately with [`LedgerError::NoWallet`],
/// without attempting any network round trip and without retrying.
///
/// Callable repeatedly; each call may return a different underlying handle
/// if the user has switched accounts since the last one.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn acquire_session(&self) -> Result<Session, LedgerError>;
}

// ─── LedgerSigner ────────────────────────────────────────────────────────────

/// Transport half of a session: free reads and signed mutating calls
/// against a bound contract.
#[async_trait]
pub trait LedgerSigner: Send + Sync {
    /// Free read-only call. No transaction, no signing prompt; suspends on
    /// the network round trip.
    async fn call(
        &self,
        address: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, LedgerError>;

    /// Sign and submit a mutating call.
    ///
    /// Signing may suspend indefinitely while the wallet waits for user
    /// approval, and may fail with [`LedgerError::UserRejected`] or
    /// [`LedgerError::InsufficientFunds`]. Returns as soon as the ledger
    /// has accepted the transaction for inclusion; confirmation is awaited
    /// separately through the returned [`PendingTx`].
    async fn send_transaction(
        &self,
        address: &str,
        method: &str,
        params: Value,
    ) -> Result<Box<dyn PendingTx>, LedgerError>;
}

// ─── PendingTx ───────────────────────────────────────────────────────────────

/// A submitted-but-not-yet-finalized transaction handle.
#[async_trait]
pub trait PendingTx: Send {
    /// Await on-ledger confirmation of this transaction.
    ///
    /// May suspend for an unbounded, network-dependent duration; no
    /// client-side timeout is imposed — the underlying ledger client owns
    /// this. Consumes the handle: a transaction is confirmed at most once.
    async fn confirm(self: Box<Self>) -> Result<(), LedgerError>;
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// An opaque authenticated signer handle.
///
/// Invalidated implicitly the moment the wallet becomes unavailable or the
/// user revokes access — the next call through the signer simply fails.
#[derive(Clone)]
pub struct Session {
    account: String,
    signer: Arc<dyn LedgerSigner>,
}

impl Session {
    pub fn new(account: impl Into<String>, signer: Arc<dyn LedgerSigner>) -> Self {
        Self {
            account: account.into(),
            signer,
        }
    }

    /// Account label the wallet reported for this session.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn signer(&self) -> &Arc<dyn LedgerSigner> {
        &self.signer
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The signer is opaque by design; show the account only.
        f.debug_struct("Session")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
