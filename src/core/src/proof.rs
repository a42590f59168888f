//! Proof seam between transition preparation and application.

use crate::errors::LedgerError;
use crate::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque validity proof for a prepared transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Identifier of the system that produced the proof
    pub system: String,
    /// Proof bytes
    pub data: Vec<u8>,
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proof {{ system: {}, data: 0x{} }}", self.system, hex::encode(&self.data))
    }
}

/// Constructs and verifies validity proofs for transitions.
pub trait ProofSystem {
    /// Proves that the transition's preconditions held against its snapshot.
    fn prove(&self, transition: &Transition) -> Result<Proof, LedgerError>;

    /// Verifies a proof produced by [`ProofSystem::prove`].
    fn verify(&self, transition: &Transition, proof: &Proof) -> Result<(), LedgerError>;
}

/// Proof system that commits to the transition digest.
///
/// It attests to nothing beyond the integrity of the transition and exists to
/// drive the prove/verify flow in hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct DigestProofSystem;

impl DigestProofSystem {
    /// System identifier recorded in every proof.
    pub const SYSTEM: &'static str = "digest-sha256";
}

impl ProofSystem for DigestProofSystem {
    fn prove(&self, transition: &Transition) -> Result<Proof, LedgerError> {
        Ok(Proof {
            system: Self::SYSTEM.to_string(),
            data: transition.digest()?.to_vec(),
        })
    }

    fn verify(&self, transition: &Transition, proof: &Proof) -> Result<(), LedgerError> {
        if proof.system != Self::SYSTEM {
            return Err(LedgerError::ProofVerificationFailed(format!(
                "unsupported proof system {}",
                proof.system
            )));
        }
        if proof.data[..] != transition.digest()?[..] {
            return Err(LedgerError::ProofVerificationFailed(
                "proof does not match transition".to_string(),
            ));
        }
        Ok(())
    }
}
