//! # Value Objects
//!
//! Immutable domain primitives for the Ark program.
//! These types represent concepts that are defined by their value, not identity.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// PUBKEY (32 bytes)
// =============================================================================

/// A 32-byte identity reference.
///
/// Used for signers, record addresses, the program id and for the entries
/// stored in membership lists. The core never dereferences it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    /// Encoded length in bytes.
    pub const LEN: usize = 32;

    /// The zero identity. Never a valid signer.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a pubkey from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a random pubkey, the way a fresh keypair would.
    #[must_use]
    pub fn new_unique() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Derives a pubkey from a seed: `sha256(seed)`.
    #[must_use]
    pub fn from_seed(seed: &[u8]) -> Self {
        let digest = Sha256::digest(seed);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Creates a pubkey from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == Self::LEN {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Full lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self.to_hex())
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Pubkey> for [u8; 32] {
    fn from(key: Pubkey) -> Self {
        key.0
    }
}

/// Error parsing a hex-encoded pubkey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePubkeyError {
    /// Input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    /// Input decoded to the wrong number of bytes.
    #[error("invalid length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| ParsePubkeyError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(ParsePubkeyError::InvalidLength(bytes.len()))
    }
}

// Hex strings for JSON/TOML, raw 32 bytes for account data.
impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

// =============================================================================
// RECORD KIND
// =============================================================================

/// The two record types the program owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Global analytics with the government registry.
    Analytics,
    /// Escrow registry of trades and services.
    Escrow,
}

impl RecordKind {
    /// Account type name used to derive the discriminator.
    #[must_use]
    pub const fn account_name(self) -> &'static str {
        match self {
            Self::Analytics => "ArkAnalytics",
            Self::Escrow => "EscrowInfo",
        }
    }

    /// First 8 bytes of `sha256("account:<AccountName>")`.
    #[must_use]
    pub fn discriminator(self) -> [u8; 8] {
        let digest = Sha256::digest(format!("account:{}", self.account_name()).as_bytes());
        let mut out = [0u8; 8];
        out.copy_from_slice(&digest[..8]);
        out
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analytics => write!(f, "analytics"),
            Self::Escrow => write!(f, "escrow"),
        }
    }
}

// =============================================================================
// LIST KIND
// =============================================================================

/// The bounded membership lists held by the records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// `AnalyticsRecord::governments`.
    Governments,
    /// `EscrowRecord::trades`.
    Trades,
    /// `EscrowRecord::services`.
    Services,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Governments => write!(f, "governments"),
            Self::Trades => write!(f, "trades"),
            Self::Services => write!(f, "services"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
