//! Prepared ledger transitions.
//!
//! A [`Transition`] is the output of the pure preparation phase: who is
//! calling, which snapshot the call was evaluated against, the absolute
//! values it will write and the events it will emit. It is the statement a
//! validity proof attests to.

use crate::errors::LedgerError;
use crate::events::LedgerEvent;
use crate::precondition::{Field, FieldValue, Preconditions};
use crate::types::{AccountId, Amount, LedgerState, Version};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Domain tag mixed into every transition digest.
const TRANSITION_DOMAIN: &[u8] = b"meow:transition:v1";

/// A state-transition request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    /// Set `is_paused` (owner only)
    Pause,
    /// Clear `is_paused` (owner only)
    Unpause,
    /// Move `amount` to `to`
    Transfer {
        /// The recipient
        to: AccountId,
        /// The amount to transfer
        amount: Amount,
    },
    /// Destroy `amount`
    Burn {
        /// The amount to burn
        amount: Amount,
    },
}

impl Call {
    /// The method name of the call.
    pub fn name(&self) -> &'static str {
        match self {
            Call::Pause => "pause",
            Call::Unpause => "unpause",
            Call::Transfer { .. } => "transfer",
            Call::Burn { .. } => "burn",
        }
    }

    /// Whether the call is restricted to the ledger owner.
    pub fn is_owner_only(&self) -> bool {
        matches!(self, Call::Pause | Call::Unpause)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Pause | Call::Unpause => f.write_str(self.name()),
            Call::Transfer { to, amount } => write!(f, "transfer {{ to: {}, amount: {} }}", to, amount),
            Call::Burn { amount } => write!(f, "burn {{ amount: {} }}", amount),
        }
    }
}

/// An absolute write of `value` into `field`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWrite {
    /// The field written
    pub field: Field,
    /// The new value
    pub value: FieldValue,
}

impl FieldWrite {
    /// Writes an amount into `field`.
    pub fn amount(field: Field, value: Amount) -> Self {
        Self {
            field,
            value: FieldValue::Amount(value),
        }
    }

    /// Writes a flag into `field`.
    pub fn flag(field: Field, value: bool) -> Self {
        Self {
            field,
            value: FieldValue::Flag(value),
        }
    }

    /// Writes the value into the record.
    pub(crate) fn write(&self, state: &mut LedgerState) -> Result<(), LedgerError> {
        match (self.field, self.value) {
            (Field::TotalSupply, FieldValue::Amount(v)) => state.total_supply = v,
            (Field::IsPaused, FieldValue::Flag(v)) => state.is_paused = v,
            (Field::Owner, FieldValue::Account(v)) => state.owner = v,
            (Field::Balance, FieldValue::Amount(v)) => state.balance = v,
            (field, value) => {
                return Err(LedgerError::SerializationError(format!(
                    "value {} does not fit field {}",
                    value, field
                )))
            }
        }
        Ok(())
    }
}

/// A prepared, not yet applied, state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The authenticated caller
    pub sender: AccountId,
    /// The requested call
    pub call: Call,
    /// The record version observed during preparation
    pub base_version: Version,
    /// Snapshot of every field the call depends on
    pub preconditions: Preconditions,
    /// Writes to perform, in order
    pub writes: Vec<FieldWrite>,
    /// Events to emit once applied
    pub events: Vec<LedgerEvent>,
}

impl Transition {
    /// Canonical binary encoding of the transition.
    pub fn encode(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::SerializationError(e.to_string()))
    }

    /// SHA-256 digest of the canonical encoding, the statement a proof binds to.
    pub fn digest(&self) -> Result<[u8; 32], LedgerError> {
        let mut hasher = Sha256::new();
        hasher.update(TRANSITION_DOMAIN);
        hasher.update(self.encode()?);

        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Ok(hash)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition {{ sender: {}, call: {}, base_version: {}, preconditions: {}, writes: {} }}",
            self.sender,
            self.call,
            self.base_version,
            self.preconditions.len(),
            self.writes.len()
        )
    }
}
