//! The token ledger state machine.

use crate::errors::LedgerError;
use crate::events::{LedgerEvent, TokenEvent};
use crate::precondition::{Field, Preconditions};
use crate::transition::{Call, FieldWrite, Transition};
use crate::types::{AccountId, Amount, LedgerState};
use std::fmt;
use tracing::{debug, info, warn};

/// Fields a pause or unpause is prepared against.
const OWNER_SNAPSHOT: &[Field] = &[Field::Owner];

/// Fields a transfer or burn is prepared against, in check order.
const SPEND_SNAPSHOT: &[Field] = &[Field::IsPaused, Field::Balance];

/// A single ledger instance.
///
/// Mutations go through two phases. [`TokenLedger::prepare`] evaluates a call
/// against the current record without touching it and returns a
/// [`Transition`]. [`TokenLedger::apply`] re-validates the transition's
/// snapshot and, if it still holds, performs its writes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    state: Option<LedgerState>,
    events: Vec<LedgerEvent>,
}

impl TokenLedger {
    /// Creates an undeployed ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a deployed ledger from its persisted record.
    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: Some(state),
            events: Vec::new(),
        }
    }

    /// Deploys the ledger, minting the initial supply to `deployer`.
    pub fn initialize(&mut self, deployer: AccountId) -> Result<(), LedgerError> {
        if self.state.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }

        let state = LedgerState::genesis(deployer);
        info!(
            "Ledger initialized by {} with supply {}",
            deployer, state.total_supply
        );
        self.state = Some(state);
        Ok(())
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Returns the current record.
    pub fn state(&self) -> Result<&LedgerState, LedgerError> {
        self.state.as_ref().ok_or(LedgerError::NotInitialized)
    }

    pub fn total_supply(&self) -> Result<Amount, LedgerError> {
        Ok(self.state()?.total_supply)
    }

    pub fn is_paused(&self) -> Result<bool, LedgerError> {
        Ok(self.state()?.is_paused)
    }

    pub fn owner(&self) -> Result<AccountId, LedgerError> {
        Ok(self.state()?.owner)
    }

    /// Returns the ledger balance.
    ///
    /// There is a single balance for the whole ledger, so `address` does not
    /// affect the result.
    pub fn get_balance(&self, _address: &AccountId) -> Result<Amount, LedgerError> {
        Ok(self.state()?.balance)
    }

    /// Evaluates `call` from `sender` against the current record.
    ///
    /// Checks run in this order and the first failure is returned:
    /// authorization for owner-only calls, the pause flag for spending calls,
    /// then the balance. Nothing is written.
    pub fn prepare(&self, sender: AccountId, call: Call) -> Result<Transition, LedgerError> {
        let transition = evaluate(self.state()?, sender, call)?;
        debug!("Prepared {}", transition);
        Ok(transition)
    }

    /// Applies a prepared transition.
    ///
    /// Every snapshot precondition is re-validated against the current
    /// record first. The call is then evaluated again, re-checking
    /// authorization, the pause flag and the balance, and the transition's
    /// snapshot, writes and events must equal the re-derived ones. Either all
    /// writes land or none do.
    pub fn apply(&mut self, transition: Transition) -> Result<(), LedgerError> {
        let state = self.state.as_ref().ok_or(LedgerError::NotInitialized)?;

        if let Err(e) = check_transition(state, &transition) {
            warn!("Rejected {} from {}: {}", transition.call, transition.sender, e);
            return Err(e);
        }

        let mut next = state.clone();
        for write in &transition.writes {
            write.write(&mut next)?;
        }
        next.version += 1;

        info!(
            "Applied {} from {} (version {})",
            transition.call, transition.sender, next.version
        );
        self.state = Some(next);
        self.events.extend(transition.events);
        Ok(())
    }

    /// Prepares and applies `call` in one step.
    pub fn execute(&mut self, sender: AccountId, call: Call) -> Result<(), LedgerError> {
        let transition = self.prepare(sender, call)?;
        self.apply(transition)
    }

    /// Sets the pause flag. Owner only.
    pub fn pause(&mut self, sender: AccountId) -> Result<(), LedgerError> {
        self.execute(sender, Call::Pause)
    }

    /// Clears the pause flag. Owner only.
    pub fn unpause(&mut self, sender: AccountId) -> Result<(), LedgerError> {
        self.execute(sender, Call::Unpause)
    }

    /// Transfers `amount` to `to` and emits a transfer event.
    pub fn transfer(
        &mut self,
        sender: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute(sender, Call::Transfer { to, amount })
    }

    /// Burns `amount`, reducing both the balance and the total supply.
    pub fn burn(&mut self, sender: AccountId, amount: Amount) -> Result<(), LedgerError> {
        self.execute(sender, Call::Burn { amount })
    }

    /// Events emitted since the last drain, oldest first.
    pub fn pending_events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Hands the pending events to the caller.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}

fn ensure_owner(state: &LedgerState, sender: &AccountId) -> Result<(), LedgerError> {
    if *sender != state.owner {
        return Err(LedgerError::Unauthorized {
            sender: *sender,
            owner: state.owner,
        });
    }
    Ok(())
}

fn ensure_spendable(state: &LedgerState, amount: Amount) -> Result<(), LedgerError> {
    if state.is_paused {
        return Err(LedgerError::Paused);
    }
    if state.balance < amount {
        return Err(LedgerError::InsufficientBalance {
            required: amount,
            available: state.balance,
        });
    }
    Ok(())
}

/// Re-validates the snapshot, then re-derives the transition from its call
/// against the current record and requires the submitted effects to match.
fn check_transition(state: &LedgerState, transition: &Transition) -> Result<(), LedgerError> {
    transition.preconditions.check(state)?;

    let expected = evaluate(state, transition.sender, transition.call.clone())?;
    if expected.preconditions != transition.preconditions {
        return Err(LedgerError::TransitionMismatch(format!(
            "snapshot of {} does not match its call",
            transition.call.name()
        )));
    }
    if expected.writes != transition.writes {
        return Err(LedgerError::TransitionMismatch(format!(
            "writes of {} do not follow from its call",
            transition.call.name()
        )));
    }
    if expected.events != transition.events {
        return Err(LedgerError::TransitionMismatch(format!(
            "events of {} do not follow from its call",
            transition.call.name()
        )));
    }
    Ok(())
}

/// Computes the transition `call` from `sender` produces against `state`.
fn evaluate(state: &LedgerState, sender: AccountId, call: Call) -> Result<Transition, LedgerError> {
    let transition = match call {
        Call::Pause | Call::Unpause => {
            let preconditions = Preconditions::capture(state, OWNER_SNAPSHOT);
            ensure_owner(state, &sender)?;

            let paused = matches!(call, Call::Pause);
            Transition {
                sender,
                call,
                base_version: state.version,
                preconditions,
                writes: vec![FieldWrite::flag(Field::IsPaused, paused)],
                events: Vec::new(),
            }
        }
        Call::Transfer { to, amount } => {
            let preconditions = Preconditions::capture(state, SPEND_SNAPSHOT);
            ensure_spendable(state, amount)?;

            // Sender and receiver share the same balance field, so the
            // debit and credit cancel out.
            let debited = state.balance - amount;
            let credited = debited + amount;
            Transition {
                sender,
                call,
                base_version: state.version,
                preconditions,
                writes: vec![
                    FieldWrite::amount(Field::Balance, debited),
                    FieldWrite::amount(Field::Balance, credited),
                ],
                events: vec![LedgerEvent::Transfer(TokenEvent {
                    from: sender,
                    to,
                    amount,
                })],
            }
        }
        Call::Burn { amount } => {
            let preconditions = Preconditions::capture(state, SPEND_SNAPSHOT);
            ensure_spendable(state, amount)?;

            // Supply is read from the record without a snapshot of its own.
            let supply = state.total_supply.checked_sub(amount).ok_or(
                LedgerError::InsufficientSupply {
                    required: amount,
                    available: state.total_supply,
                },
            )?;
            Transition {
                sender,
                call,
                base_version: state.version,
                preconditions,
                writes: vec![
                    FieldWrite::amount(Field::Balance, state.balance - amount),
                    FieldWrite::amount(Field::TotalSupply, supply),
                ],
                events: vec![LedgerEvent::Burn(TokenEvent {
                    from: sender,
                    to: AccountId::EMPTY,
                    amount,
                })],
            }
        }
    };

    Ok(transition)
}

impl fmt::Debug for TokenLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenLedger")
            .field("state", &self.state)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
