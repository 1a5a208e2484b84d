// SPDX-License-Identifier: MIT
//! Crate configuration (`config.toml`).
//!
//! Every field has a sensible default; a missing file is not an error,
//! a malformed one is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_WALLET_ENDPOINT: &str = "http://127.0.0.1:8545";
const DEFAULT_CONTRACT_ADDRESS: &str = "0xd9145CCE52D386f254917e481eB44e9943F39138";
const DEFAULT_SCHEMA_PATH: &str = "abi.json";
const DEFAULT_CONFIRM_POLL_MS: u64 = 1_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Ledger connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Wallet-bridge JSON-RPC endpoint. An unreachable endpoint is treated
    /// as "no wallet integration present", not a fatal error.
    pub wallet_endpoint: String,
    /// Address of the task contract on the ledger.
    pub contract_address: String,
    /// Path to the contract interface description (JSON).
    pub schema_path: PathBuf,
    /// Interval between confirmation receipt polls, in milliseconds.
    pub confirm_poll_ms: u64,
    /// Per-request HTTP timeout, in seconds. Applies to individual round
    /// trips only — confirmation as a whole is unbounded.
    pub request_timeout_secs: u64,
    /// Default log filter when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            wallet_endpoint: DEFAULT_WALLET_ENDPOINT.to_string(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            confirm_poll_ms: DEFAULT_CONFIRM_POLL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_filter: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Load from a TOML file, falling back to defaults if it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("malformed config {}", path.display()))?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LedgerConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.wallet_endpoint, DEFAULT_WALLET_ENDPOINT);
        assert_eq!(config.confirm_poll_ms, DEFAULT_CONFIRM_POLL_MS);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "wallet_endpoint = \"http://10.0.0.5:8545\"\n").unwrap();
        let config = LedgerConfig::load(&path).unwrap();
        assert_eq!(config.wallet_endpoint, "http://10.0.0.5:8545");
        assert_eq!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "confirm_poll_ms = \"not a number\"\n").unwrap();
        assert!(LedgerConfig::load(&path).is_err());
    }

    #[test]
    fn durations_derive_from_the_raw_fields() {
        let config = LedgerConfig {
            confirm_poll_ms: 250,
            request_timeout_secs: 5,
            ..LedgerConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }
}
