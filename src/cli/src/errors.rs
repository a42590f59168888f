//! Error types for the ledger CLI.

use meow_core::LedgerError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur in the ledger CLI.
#[derive(Debug)]
pub enum CliError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when the ledger rejects an operation.
    LedgerError(LedgerError),

    /// Error when an account key file is missing or malformed.
    AccountError(String),

    /// Error when the ledger file is missing or malformed.
    StoreError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(e) => write!(f, "File error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::LedgerError(e) => write!(f, "Ledger error: {}", e),
            CliError::AccountError(msg) => write!(f, "Account error: {}", msg),
            CliError::StoreError(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CliError::FileError(e) => Some(e),
            CliError::JsonError(e) => Some(e),
            CliError::LedgerError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::FileError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

impl From<LedgerError> for CliError {
    fn from(error: LedgerError) -> Self {
        CliError::LedgerError(error)
    }
}
