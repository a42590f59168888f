//! Core primitives for the proof-gated token ledger.
//!
//! This crate provides the ledger state machine: the persisted record, the
//! snapshot preconditions every mutation is prepared against, the two-phase
//! prepare/apply contract and the events emitted by transfers and burns.

pub mod auth;
pub mod errors;
pub mod events;
pub mod host;
pub mod ledger;
pub mod precondition;
pub mod proof;
pub mod transition;
pub mod types;

// Re-export commonly used types
pub use auth::{verify_sender, AccountKey, Signature};
pub use errors::LedgerError;
pub use events::{LedgerEvent, TokenEvent};
pub use host::LocalHost;
pub use ledger::TokenLedger;
pub use precondition::{Field, FieldValue, Precondition, Preconditions};
pub use proof::{DigestProofSystem, Proof, ProofSystem};
pub use transition::{Call, FieldWrite, Transition};
pub use types::{AccountId, Amount, LedgerState, INITIAL_SUPPLY};
