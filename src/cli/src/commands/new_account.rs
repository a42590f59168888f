//! New account command for the ledger CLI.

use crate::account::Account;
use crate::errors::CliError;
use meow_core::AccountId;
use std::path::Path;
use tracing::info;

/// Runs the new-account command.
pub fn run<P: AsRef<Path>>(account_path: P) -> Result<AccountId, CliError> {
    // Never overwrite an existing key
    if account_path.as_ref().exists() {
        return Err(CliError::AccountError(format!(
            "Account file {} already exists",
            account_path.as_ref().display()
        )));
    }

    let account = Account::new();
    account.save(&account_path)?;

    let id = account.id()?;
    info!("Account {} saved to {}", id, account_path.as_ref().display());
    Ok(id)
}
