// SPDX-License-Identifier: MIT
//! Error taxonomy for ledger interactions.
//!
//! Every failure a ledger call can surface is folded into [`LedgerError`].
//! Nothing past the Task Store ever sees a raw transport or wallet error —
//! the store converts these into a single human-readable message string.

use thiserror::Error;

/// Failures surfaced by the wallet, the transport, or the contract itself.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No wallet integration detected in the host environment.
    ///
    /// Deterministic and immediate — no network call is attempted, no retry.
    /// The `Display` text is the exact message surfaced to the user.
    #[error("Metamask is required.")]
    NoWallet,

    /// The user declined the signing prompt.
    #[error("user rejected the signing request")]
    UserRejected,

    /// The signing account cannot cover the transaction cost.
    #[error("insufficient funds for transaction")]
    InsufficientFunds,

    /// A read or confirmation round trip failed at the transport level.
    #[error("network error: {0}")]
    Network(String),

    /// The contract rejected the call (e.g. deleting a task the caller
    /// does not own).
    #[error("ledger rejected the call: {0}")]
    LedgerRevert(String),

    /// The contract interface description does not expose a method the
    /// binding requires. Raised at bind time, before any I/O.
    #[error("contract schema is missing method `{0}`")]
    MissingMethod(&'static str),

    /// The configured contract address is not a valid ledger address.
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wallet_displays_the_user_facing_message() {
        assert_eq!(LedgerError::NoWallet.to_string(), "Metamask is required.");
    }

    #[test]
    fn revert_reason_is_preserved() {
        let err = LedgerError::LedgerRevert("not task owner".into());
        assert_eq!(err.to_string(), "ledger rejected the call: not task owner");
    }
}
