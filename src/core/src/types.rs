//! Core types for the proof-gated token ledger.

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Token amount in base units.
pub type Amount = u64;

/// Ledger record version, bumped on every applied transition.
pub type Version = u64;

/// Units minted to the deployer when the ledger is initialized.
pub const INITIAL_SUPPLY: Amount = 1_000_000_000_000;

/// A 32-byte account identifier, the public key bytes of an account key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The empty account, used as the counterparty of burns.
    pub const EMPTY: AccountId = AccountId([0u8; 32]);

    /// Creates an account id from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the empty account.
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

/// Error returned when parsing an [`AccountId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAccountError {
    /// The input was not valid hex.
    #[error("invalid hex in account id: {0}")]
    InvalidHex(String),
    /// The input decoded to the wrong number of bytes.
    #[error("invalid account id length: {0} (expected 32 bytes)")]
    InvalidLength(usize),
}

impl FromStr for AccountId {
    type Err = ParseAccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| ParseAccountError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(ParseAccountError::InvalidLength(bytes.len()));
        }
        let mut id = [0u8; 32];
        id.copy_from_slice(&bytes);
        Ok(AccountId(id))
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AccountIdVisitor;

        impl<'de> serde::de::Visitor<'de> for AccountIdVisitor {
            type Value = AccountId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 32-byte account id or its hex encoding")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                AccountId::from_str(v).map_err(E::custom)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.len() != 32 {
                    return Err(E::custom(ParseAccountError::InvalidLength(v.len())));
                }
                let mut id = [0u8; 32];
                id.copy_from_slice(v);
                Ok(AccountId(id))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut id = [0u8; 32];
                for (i, byte) in id.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(AccountId(id))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(AccountIdVisitor)
        } else {
            deserializer.deserialize_bytes(AccountIdVisitor)
        }
    }
}

/// The persisted ledger record.
///
/// `balance` is a single scalar shared by the whole ledger, not a per-account
/// mapping: every holder reads and writes the same value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Total units in circulation
    pub total_supply: Amount,
    /// Global transfer/burn kill-switch
    pub is_paused: bool,
    /// Sole authority for pause control
    pub owner: AccountId,
    /// The ledger balance
    pub balance: Amount,
    /// Number of transitions applied since deployment
    pub version: Version,
}

impl LedgerState {
    /// Creates the record written at deployment.
    pub fn genesis(deployer: AccountId) -> Self {
        Self {
            total_supply: INITIAL_SUPPLY,
            is_paused: false,
            owner: deployer,
            balance: INITIAL_SUPPLY,
            version: 0,
        }
    }

    /// Computes the SHA-256 commitment to this record.
    pub fn commitment(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        let mut supply_bytes = [0u8; 8];
        LittleEndian::write_u64(&mut supply_bytes, self.total_supply);
        hasher.update(supply_bytes);

        hasher.update([self.is_paused as u8]);
        hasher.update(self.owner.as_bytes());

        let mut balance_bytes = [0u8; 8];
        LittleEndian::write_u64(&mut balance_bytes, self.balance);
        hasher.update(balance_bytes);

        let mut version_bytes = [0u8; 8];
        LittleEndian::write_u64(&mut version_bytes, self.version);
        hasher.update(version_bytes);

        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }
}

impl fmt::Display for LedgerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ledger {{ total_supply: {}, paused: {}, owner: {}, balance: {}, version: {} }}",
            self.total_supply, self.is_paused, self.owner, self.balance, self.version
        )
    }
}
