//! Operator CLI for the proof-gated token ledger.

pub mod account;
pub mod commands;
pub mod config;
pub mod errors;
pub mod store;

// Re-export commonly used types and functions
pub use account::Account;
pub use commands::{deploy, new_account, query, submit};
pub use config::CliConfig;
pub use errors::CliError;
pub use store::{LedgerStore, StoredLedger};
