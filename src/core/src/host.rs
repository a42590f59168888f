//! Local host that drives a ledger through the prove-then-apply flow.

use crate::auth::{verify_sender, AccountKey, Signature};
use crate::errors::LedgerError;
use crate::events::LedgerEvent;
use crate::ledger::TokenLedger;
use crate::proof::{Proof, ProofSystem};
use crate::transition::{Call, Transition};
use crate::types::{AccountId, LedgerState};
use tracing::{debug, info};

/// Owns one ledger and the proof system that gates its transitions.
///
/// Every applied transition must carry a proof that verifies under the
/// host's proof system and the sender's signature over its digest. Failed
/// submissions are never retried.
#[derive(Debug)]
pub struct LocalHost<P: ProofSystem> {
    ledger: TokenLedger,
    prover: P,
}

impl<P: ProofSystem> LocalHost<P> {
    /// Creates a host around an undeployed ledger.
    pub fn new(prover: P) -> Self {
        Self {
            ledger: TokenLedger::new(),
            prover,
        }
    }

    /// Creates a host around an existing ledger.
    pub fn with_ledger(ledger: TokenLedger, prover: P) -> Self {
        Self { ledger, prover }
    }

    /// Deploys the ledger on behalf of `deployer`.
    pub fn deploy(&mut self, deployer: AccountId) -> Result<(), LedgerError> {
        self.ledger.initialize(deployer)?;
        info!("Deployed ledger owned by {}", deployer);
        Ok(())
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn state(&self) -> Result<&LedgerState, LedgerError> {
        self.ledger.state()
    }

    /// Consumes the host, returning its ledger.
    pub fn into_ledger(self) -> TokenLedger {
        self.ledger
    }

    /// Prepares `call` against the current state and proves it, without
    /// applying it.
    pub fn build(&self, sender: AccountId, call: Call) -> Result<(Transition, Proof), LedgerError> {
        let transition = self.ledger.prepare(sender, call)?;
        let proof = self.prover.prove(&transition)?;
        debug!("Built {}", proof);
        Ok((transition, proof))
    }

    /// Verifies the proof and the sender signature of a transition built
    /// earlier, applies it and returns the events it emitted.
    pub fn submit_prepared(
        &mut self,
        transition: Transition,
        proof: &Proof,
        signature: &Signature,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        self.prover.verify(&transition, proof)?;
        verify_sender(&transition, signature)?;
        self.ledger.apply(transition)?;
        Ok(self.ledger.drain_events())
    }

    /// Builds, proves, signs, verifies and applies `call` from `key`'s account.
    pub fn submit(&mut self, key: &AccountKey, call: Call) -> Result<Vec<LedgerEvent>, LedgerError> {
        let (transition, proof) = self.build(key.id()?, call)?;
        let signature = key.sign(&transition)?;
        self.submit_prepared(transition, &proof, &signature)
    }
}
