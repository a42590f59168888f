//! Submits a state-transition call from the configured account.

use crate::account::Account;
use crate::errors::CliError;
use crate::store::LedgerStore;
use meow_core::{Call, DigestProofSystem, LedgerEvent, LocalHost};
use tracing::info;

/// Prepares, proves and signs `call`, has the host verify and apply it, then
/// persists the ledger.
///
/// Returns the events the call emitted.
pub fn run(store: &LedgerStore, account: &Account, call: Call) -> Result<Vec<LedgerEvent>, CliError> {
    let mut stored = store.load()?;
    let mut host = LocalHost::with_ledger(stored.ledger(), DigestProofSystem);

    let sender = account.id()?;
    info!("Submitting {} from {}", call, sender);

    let (transition, proof) = host.build(sender, call)?;
    let signature = account.sign(&transition)?;
    let events = host.submit_prepared(transition, &proof, &signature)?;

    stored.record(host.ledger(), events.clone())?;
    store.save(&stored)?;

    Ok(events)
}
