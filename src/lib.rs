// SPDX-License-Identifier: MIT
//! taskledger — a to-do list whose durable state lives on a smart contract.
//!
//! The library binds a caller-facing view to a remote, permissioned
//! ledger, submits mutating operations as signed transactions, awaits
//! their finality, and reconciles the local snapshot with ledger state
//! after every mutation. Presentation is someone else's job: callers read
//! [`store::TaskView`] and drive the three entry points on
//! [`store::TaskStore`].
//!
//! Layering, leaves first:
//! - [`wallet`] — Session Provider and the signing transport seams.
//! - [`schema`] + [`ledger`] — contract interface and the bound handle.
//! - [`executor`] — transaction submission and outcome classification.
//! - [`store`] — the state machine that owns the cached collection.
//! - [`rpc`] — JSON-RPC wallet-bridge implementation of the seams.

pub mod config;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod rpc;
pub mod schema;
pub mod store;
pub mod tasks;
pub mod wallet;

pub use error::LedgerError;
pub use store::{StorePhase, TaskStore, TaskView};
pub use tasks::{Task, TaskId};
