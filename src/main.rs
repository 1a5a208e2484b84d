// SPDX-License-Identifier: MIT
//! Thin CLI shell over the [`TaskStore`].
//!
//! Stateless by design: parse arguments, wire the store, run one
//! operation, print the resulting view. All behavior lives in the library.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskledger::config::LedgerConfig;
use taskledger::ledger::ContractAddress;
use taskledger::rpc::RpcWalletProvider;
use taskledger::schema::InterfaceSchema;
use taskledger::store::{TaskStore, TaskView};
use taskledger::tasks::TaskId;

#[derive(Parser)]
#[command(name = "taskledger", about = "Manage tasks stored on a ledger contract")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml", env = "TASKLEDGER_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the caller's tasks.
    List,
    /// Add a task. Title and body must be non-empty.
    Add { title: String, body: String },
    /// Delete a task by its ledger-assigned id.
    Delete { id: TaskId },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = LedgerConfig::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone())),
        )
        .init();

    let schema = InterfaceSchema::from_file(&config.schema_path)?;
    let address = ContractAddress::new(&config.contract_address)?;
    let wallet = Arc::new(RpcWalletProvider::new(&config)?);
    let store = TaskStore::new(wallet, address, schema);

    match cli.command {
        Command::List => store.refresh().await,
        Command::Add { title, body } => store.add_task(&title, &body).await,
        Command::Delete { id } => store.delete_task(id).await,
    }

    print_view(&store.view());
    Ok(())
}

fn print_view(view: &TaskView) {
    if let Some(message) = &view.message {
        println!("{message}");
    }
    if view.tasks.is_empty() {
        if view.message.is_none() {
            println!("No tasks available.");
        }
        return;
    }
    for task in &view.tasks {
        let mark = if task.done { "x" } else { " " };
        println!("[{mark}] #{} {}", task.id, task.title);
        if !task.body.is_empty() {
            println!("       {}", task.body);
        }
    }
}
