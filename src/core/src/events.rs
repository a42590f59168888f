//! Events emitted by successful transfers and burns.

use crate::types::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload shared by transfer and burn events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEvent {
    /// The sender of the call
    pub from: AccountId,
    /// The counterparty, [`AccountId::EMPTY`] for burns
    pub to: AccountId,
    /// The amount moved or destroyed
    pub amount: Amount,
}

/// An event appended to the ledger's side-output list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Emitted by `transfer`
    Transfer(TokenEvent),
    /// Emitted by `burn`
    Burn(TokenEvent),
}

impl LedgerEvent {
    /// Returns the event payload.
    pub fn payload(&self) -> &TokenEvent {
        match self {
            LedgerEvent::Transfer(event) | LedgerEvent::Burn(event) => event,
        }
    }

    /// The event name as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::Transfer(_) => "transfer",
            LedgerEvent::Burn(_) => "burn",
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TokenEvent { from, to, amount } = self.payload();
        write!(
            f,
            "{} {{ from: {}, to: {}, amount: {} }}",
            self.kind(),
            from,
            to,
            amount
        )
    }
}
