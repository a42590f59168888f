//! Error types for the core crate.

use crate::precondition::{Field, FieldValue};
use crate::types::{AccountId, Amount};
use thiserror::Error;

/// Errors that can occur while preparing or applying a ledger transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The caller is not the principal permitted to run the operation.
    #[error("Unauthorized: sender {sender} is not the ledger owner {owner}")]
    Unauthorized {
        /// The sender of the rejected call
        sender: AccountId,
        /// The owner stored in the ledger
        owner: AccountId,
    },

    /// A transfer or burn was attempted while the ledger is paused.
    #[error("Ledger is paused")]
    Paused,

    /// The requested amount exceeds the available balance.
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// The required balance
        required: Amount,
        /// The available balance
        available: Amount,
    },

    /// A burn would take the total supply below zero.
    #[error("Insufficient supply: required {required}, available {available}")]
    InsufficientSupply {
        /// The amount being burned
        required: Amount,
        /// The current total supply
        available: Amount,
    },

    /// A field no longer holds the value the transition was prepared against.
    #[error("Stale state: {field} was {expected} when prepared, now {actual}")]
    StaleState {
        /// The field that changed
        field: Field,
        /// The snapshot value
        expected: FieldValue,
        /// The current value
        actual: FieldValue,
    },

    /// A transition's snapshot, writes or events do not follow from its call.
    #[error("Transition mismatch: {0}")]
    TransitionMismatch(String),

    /// The sender signature attached to a transition did not verify.
    #[error("Invalid sender signature: {0}")]
    InvalidSignature(String),

    /// An account key could not be turned into a signing key.
    #[error("Invalid account key: {0}")]
    InvalidAccountKey(String),

    /// An operation other than `initialize` was attempted before deployment.
    #[error("Ledger is not initialized")]
    NotInitialized,

    /// `initialize` was called on a deployed ledger.
    #[error("Ledger is already initialized")]
    AlreadyInitialized,

    /// The proof attached to a transition did not verify.
    #[error("Proof verification failed: {0}")]
    ProofVerificationFailed(String),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LedgerError {
    /// Whether the error was caused by a snapshot mismatch, in which case the
    /// caller may re-fetch state and rebuild the call.
    pub fn is_stale(&self) -> bool {
        matches!(self, LedgerError::StaleState { .. })
    }
}
