//! Account key files for the ledger CLI.

use crate::errors::CliError;
use meow_core::{AccountId, AccountKey, Signature, Transition};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// A local account key file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Hex-encoded ed25519 secret key
    secret: String,
}

impl Account {
    /// Creates an account with a random key.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        Self::from_secret(seed)
    }

    /// Creates an account from a 32-byte secret key.
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            secret: hex::encode(secret),
        }
    }

    /// Loads an account from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            CliError::AccountError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let account: Account = serde_json::from_str(&contents)?;
        // Reject malformed keys early
        account.key()?;
        Ok(account)
    }

    /// Saves an account to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let contents = serde_json::to_string_pretty(self)?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(contents.as_bytes())?;

        Ok(())
    }

    /// Gets the signing key for the account.
    pub fn key(&self) -> Result<AccountKey, CliError> {
        let bytes = hex::decode(&self.secret)
            .map_err(|e| CliError::AccountError(format!("Invalid secret key hex: {}", e)))?;
        if bytes.len() != 32 {
            return Err(CliError::AccountError(format!(
                "Invalid secret key length: {} (expected 32 bytes)",
                bytes.len()
            )));
        }

        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        Ok(AccountKey::from_secret(secret))
    }

    /// Gets the ledger identifier of the account.
    pub fn id(&self) -> Result<AccountId, CliError> {
        Ok(self.key()?.id()?)
    }

    /// Signs the digest of a prepared transition.
    pub fn sign(&self, transition: &Transition) -> Result<Signature, CliError> {
        Ok(self.key()?.sign(transition)?)
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}
