//! JSON file store for a ledger record and its event log.

use crate::errors::CliError;
use meow_core::{LedgerEvent, LedgerState, TokenLedger};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of a ledger file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLedger {
    /// The ledger record, absent until deployment
    pub state: Option<LedgerState>,
    /// Every event emitted so far, oldest first
    #[serde(default)]
    pub events: Vec<LedgerEvent>,
}

impl StoredLedger {
    /// Rebuilds a ledger instance from the stored record.
    pub fn ledger(&self) -> TokenLedger {
        match &self.state {
            Some(state) => TokenLedger::from_state(state.clone()),
            None => TokenLedger::new(),
        }
    }

    /// Records the ledger's current state and appends `events`.
    pub fn record(&mut self, ledger: &TokenLedger, events: Vec<LedgerEvent>) -> Result<(), CliError> {
        self.state = Some(ledger.state()?.clone());
        self.events.extend(events);
        Ok(())
    }
}

/// A ledger file on disk.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored ledger. A missing file is an undeployed ledger.
    pub fn load(&self) -> Result<StoredLedger, CliError> {
        if !self.path.exists() {
            debug!("No ledger file at {}, starting undeployed", self.path.display());
            return Ok(StoredLedger::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            CliError::StoreError(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Saves the ledger, replacing the file atomically.
    pub fn save(&self, stored: &StoredLedger) -> Result<(), CliError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(stored)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved ledger to {}", self.path.display());
        Ok(())
    }
}
