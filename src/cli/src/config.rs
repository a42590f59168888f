//! Configuration for the ledger CLI.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the ledger CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path to the ledger state file
    pub state_file: PathBuf,
    /// Path to the account key file used as the sender
    pub account_file: PathBuf,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push("meow");
        Self {
            state_file: dir.join("ledger.json"),
            account_file: dir.join("account.json"),
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
