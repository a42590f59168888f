//! Snapshot preconditions.
//!
//! A transition is prepared against the values it observed for the fields it
//! depends on. Before its writes are applied every captured field is re-read
//! and compared with the snapshot; the first mismatch rejects the whole
//! transition. Nothing is locked and nothing is retried.

use crate::errors::LedgerError;
use crate::types::{AccountId, Amount, LedgerState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted ledger field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `total_supply`
    TotalSupply,
    /// `is_paused`
    IsPaused,
    /// `owner`
    Owner,
    /// `balance`
    Balance,
}

impl Field {
    /// Reads the current value of this field.
    pub fn read(self, state: &LedgerState) -> FieldValue {
        match self {
            Field::TotalSupply => FieldValue::Amount(state.total_supply),
            Field::IsPaused => FieldValue::Flag(state.is_paused),
            Field::Owner => FieldValue::Account(state.owner),
            Field::Balance => FieldValue::Amount(state.balance),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::TotalSupply => "total_supply",
            Field::IsPaused => "is_paused",
            Field::Owner => "owner",
            Field::Balance => "balance",
        };
        f.write_str(name)
    }
}

/// The value held by a [`Field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A base-unit amount
    Amount(Amount),
    /// A boolean flag
    Flag(bool),
    /// An account identifier
    Account(AccountId),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Amount(amount) => write!(f, "{}", amount),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
            FieldValue::Account(account) => write!(f, "{}", account),
        }
    }
}

/// Asserts that `field` still equals `expected` when the transition is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    /// The field to re-read
    pub field: Field,
    /// The value observed when the transition was prepared
    pub expected: FieldValue,
}

impl Precondition {
    /// Checks this precondition against the current record.
    pub fn check(&self, state: &LedgerState) -> Result<(), LedgerError> {
        let actual = self.field.read(state);
        if actual != self.expected {
            return Err(LedgerError::StaleState {
                field: self.field,
                expected: self.expected,
                actual,
            });
        }
        Ok(())
    }
}

/// Ordered set of snapshot preconditions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preconditions(Vec<Precondition>);

impl Preconditions {
    /// Captures the current values of `fields`, in the given order.
    pub fn capture(state: &LedgerState, fields: &[Field]) -> Self {
        Self(
            fields
                .iter()
                .map(|&field| Precondition {
                    field,
                    expected: field.read(state),
                })
                .collect(),
        )
    }

    /// Re-validates every precondition in order, failing on the first mismatch.
    pub fn check(&self, state: &LedgerState) -> Result<(), LedgerError> {
        self.0.iter().try_for_each(|p| p.check(state))
    }

    /// The snapshot value captured for `field`, if any.
    pub fn expected(&self, field: Field) -> Option<FieldValue> {
        self.0.iter().find(|p| p.field == field).map(|p| p.expected)
    }

    /// Whether `field` is part of the snapshot.
    pub fn covers(&self, field: Field) -> bool {
        self.expected(field).is_some()
    }

    /// Iterates over the preconditions in check order.
    pub fn iter(&self) -> impl Iterator<Item = &Precondition> {
        self.0.iter()
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
