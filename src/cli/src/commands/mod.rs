//! Commands for the ledger CLI.

pub mod deploy;
pub mod new_account;
pub mod query;
pub mod submit;
