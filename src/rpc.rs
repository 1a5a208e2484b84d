// SPDX-License-Identifier: MIT
//! Wallet-bridge JSON-RPC client.
//!
//! Production implementation of the [`WalletProvider`] / [`LedgerSigner`]
//! seams over a local wallet bridge speaking JSON-RPC 2.0 — the non-browser
//! stand-in for a browser-injected wallet provider. Three bridge methods
//! are used:
//!
//! - `wallet_requestSession` — prompts the wallet, returns the account.
//! - `ledger_call` / `ledger_sendTransaction` — free reads and signed
//!   mutating calls against a contract.
//! - `ledger_getTransactionReceipt` — confirmation polling.
//!
//! A bridge that cannot be reached at session time means no wallet
//! integration is present ([`LedgerError::NoWallet`]); the same transport
//! failure on a later call is a plain [`LedgerError::Network`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::wallet::{LedgerSigner, PendingTx, Session, WalletProvider};

/// EIP-1193 code for a user-rejected request.
const CODE_USER_REJECTED: i64 = 4001;

// ─── Wire envelopes ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Map a JSON-RPC error object onto the crate taxonomy.
fn classify(err: RpcErrorBody) -> LedgerError {
    let lower = err.message.to_lowercase();
    if err.code == CODE_USER_REJECTED {
        LedgerError::UserRejected
    } else if lower.contains("insufficient funds") {
        LedgerError::InsufficientFunds
    } else if lower.contains("revert") {
        LedgerError::LedgerRevert(err.message)
    } else {
        LedgerError::Network(format!("RPC error {}: {}", err.code, err.message))
    }
}

// ─── RpcWalletProvider ───────────────────────────────────────────────────────

/// JSON-RPC wallet bridge client. Cheap to clone; clones share the HTTP
/// connection pool and the request id counter.
#[derive(Clone)]
pub struct RpcWalletProvider {
    client: reqwest::Client,
    endpoint: String,
    poll_interval: Duration,
    next_id: Arc<AtomicU64>,
}

impl RpcWalletProvider {
    pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LedgerError::Network(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.wallet_endpoint.clone(),
            poll_interval: config.poll_interval(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// One JSON-RPC round trip. Transport failures map to `Network`;
    /// bridge-reported errors go through [`classify`].
    async fn request(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(method, id, "rpc request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id,
                method,
                params,
            })
            .send()
            .await
            .map_err(|e| LedgerError::Network(format!("wallet bridge unreachable: {e}")))?;
        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Network(format!("malformed RPC response: {e}")))?;
        if let Some(err) = body.error {
            warn!(method, code = err.code, "rpc error");
            return Err(classify(err));
        }
        Ok(body.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn acquire_session(&self) -> Result<Session, LedgerError> {
        // An unreachable bridge at this point means no wallet integration
        // is present at all. Fail fast, no retry.
        let result = match self.request("wallet_requestSession", json!([])).await {
            Err(LedgerError::Network(_)) => return Err(LedgerError::NoWallet),
            other => other?,
        };
        let account = result
            .get("account")
            .and_then(Value::as_str)
            .ok_or(LedgerError::NoWallet)?
            .to_string();
        debug!(account, "wallet session acquired");
        Ok(Session::new(account, Arc::new(self.clone())))
    }
}

#[async_trait]
impl LedgerSigner for RpcWalletProvider {
    async fn call(
        &self,
        address: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, LedgerError> {
        self.request(
            "ledger_call",
            json!({"to": address, "method": method, "params": params}),
        )
        .await
    }

    async fn send_transaction(
        &self,
        address: &str,
        method: &str,
        params: Value,
    ) -> Result<Box<dyn PendingTx>, LedgerError> {
        let result = self
            .request(
                "ledger_sendTransaction",
                json!({"to": address, "method": method, "params": params}),
            )
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| LedgerError::Network("bridge returned no transaction hash".into()))?
            .to_string();
        debug!(%hash, "transaction accepted by the bridge");
        Ok(Box::new(RpcPendingTx {
            provider: self.clone(),
            hash,
        }))
    }
}

// ─── RpcPendingTx ────────────────────────────────────────────────────────────

/// Receipt-polling confirmation handle.
struct RpcPendingTx {
    provider: RpcWalletProvider,
    hash: String,
}

#[async_trait]
impl PendingTx for RpcPendingTx {
    async fn confirm(self: Box<Self>) -> Result<(), LedgerError> {
        // Unbounded by design: confirmation latency belongs to the ledger.
        loop {
            let receipt = self
                .provider
                .request("ledger_getTransactionReceipt", json!([self.hash]))
                .await?;
            match receipt.get("status").and_then(Value::as_u64) {
                Some(1) => {
                    debug!(hash = %self.hash, "transaction confirmed");
                    return Ok(());
                }
                Some(_) => {
                    return Err(LedgerError::LedgerRevert(format!(
                        "transaction {} reverted",
                        self.hash
                    )))
                }
                // Null receipt: not mined yet.
                None => tokio::time::sleep(self.provider.poll_interval).await,
            }
        }
    }
}
