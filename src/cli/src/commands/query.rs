//! Read-only commands for the ledger CLI.

use crate::errors::CliError;
use crate::store::LedgerStore;
use meow_core::{AccountId, Amount, LedgerEvent, LedgerState};

/// Returns the balance reported for `address`.
pub fn balance(store: &LedgerStore, address: &AccountId) -> Result<Amount, CliError> {
    let ledger = store.load()?.ledger();
    Ok(ledger.get_balance(address)?)
}

/// Returns the ledger record.
pub fn state(store: &LedgerStore) -> Result<LedgerState, CliError> {
    let ledger = store.load()?.ledger();
    Ok(ledger.state()?.clone())
}

/// Returns every event emitted so far.
pub fn events(store: &LedgerStore) -> Result<Vec<LedgerEvent>, CliError> {
    Ok(store.load()?.events)
}
