//! Deploy command for the ledger CLI.

use crate::account::Account;
use crate::errors::CliError;
use crate::store::LedgerStore;
use meow_core::{DigestProofSystem, LedgerState, LocalHost};
use tracing::info;

/// Runs the deploy command, making the account the ledger owner.
pub fn run(store: &LedgerStore, account: &Account) -> Result<LedgerState, CliError> {
    let mut stored = store.load()?;

    let mut host = LocalHost::with_ledger(stored.ledger(), DigestProofSystem);
    host.deploy(account.id()?)?;

    stored.record(host.ledger(), Vec::new())?;
    store.save(&stored)?;
    info!("Ledger deployed to {}", store.path().display());

    Ok(host.state()?.clone())
}
