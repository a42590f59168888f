//! Sender authentication for prepared transitions.
//!
//! An account is an ed25519 key whose public key bytes are its
//! [`AccountId`]. A transition is authenticated by the sender's signature
//! over [`Transition::digest`].

use crate::errors::LedgerError;
use crate::transition::Transition;
use crate::types::AccountId;
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer, Verifier};
use std::fmt;

/// Sender signature, represented as a 64-byte array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SignatureVisitor;

        impl<'de> serde::de::Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 64-byte signature")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.len() != 64 {
                    return Err(E::custom(format!(
                        "invalid signature length: {} (expected 64)",
                        v.len()
                    )));
                }

                let mut signature = [0u8; 64];
                signature.copy_from_slice(v);
                Ok(Signature(signature))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut signature = [0u8; 64];
                for (i, byte) in signature.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Signature(signature))
            }
        }

        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

/// An account signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountKey {
    secret: [u8; 32],
}

impl AccountKey {
    /// Creates a key from its 32-byte ed25519 secret.
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Returns the secret bytes.
    pub fn secret(&self) -> &[u8; 32] {
        &self.secret
    }

    fn keypair(&self) -> Result<Keypair, LedgerError> {
        let secret = SecretKey::from_bytes(&self.secret)
            .map_err(|e| LedgerError::InvalidAccountKey(e.to_string()))?;
        let public = PublicKey::from(&secret);
        Ok(Keypair { secret, public })
    }

    /// The account id, the public key bytes.
    pub fn id(&self) -> Result<AccountId, LedgerError> {
        let keypair = self.keypair()?;
        Ok(AccountId::new(keypair.public.to_bytes()))
    }

    /// Signs the digest of a prepared transition.
    pub fn sign(&self, transition: &Transition) -> Result<Signature, LedgerError> {
        let keypair = self.keypair()?;
        let digest = transition.digest()?;
        Ok(Signature(keypair.sign(&digest).to_bytes()))
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id() {
            Ok(id) => write!(f, "AccountKey({})", id),
            Err(_) => f.write_str("AccountKey(<invalid>)"),
        }
    }
}

/// Checks that `signature` was made by the transition's sender over its digest.
pub fn verify_sender(transition: &Transition, signature: &Signature) -> Result<(), LedgerError> {
    let public = PublicKey::from_bytes(transition.sender.as_bytes()).map_err(|e| {
        LedgerError::InvalidSignature(format!("sender {} is not a public key: {}", transition.sender, e))
    })?;
    let signature = ed25519_dalek::Signature::try_from(&signature.0[..])
        .map_err(|e| LedgerError::InvalidSignature(e.to_string()))?;

    let digest = transition.digest()?;
    public.verify(&digest, &signature).map_err(|e| {
        LedgerError::InvalidSignature(format!(
            "signature does not match sender {}: {}",
            transition.sender, e
        ))
    })
}
