//! # Error Types
//!
//! All error types for the Ark program.

use crate::domain::value_objects::{ListKind, Pubkey, RecordKind};
use thiserror::Error;

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors returned by program operations.
///
/// Every variant aborts the operation that raised it; none of its effects
/// are committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArkError {
    /// The target account already holds a record.
    #[error("account {address} is already initialized")]
    AlreadyInitialized {
        /// Target account.
        address: Pubkey,
    },

    /// A bounded list is at its declared capacity.
    #[error("{list} list is full: capacity {capacity}")]
    CapacityExceeded {
        /// The full list.
        list: ListKind,
        /// Its declared capacity.
        capacity: u32,
    },

    /// The identity is already present and the list rejects duplicates.
    #[error("{identity} is already registered in {list}")]
    DuplicateEntry {
        /// List that already holds the identity.
        list: ListKind,
        /// Rejected identity.
        identity: Pubkey,
    },

    /// A counter would exceed `u64::MAX`.
    #[error("counter overflow: {field}")]
    Overflow {
        /// Counter name.
        field: &'static str,
    },

    /// No record was ever initialized at the target.
    #[error("no record at {address}")]
    MissingRecord {
        /// Target account.
        address: Pubkey,
    },

    /// The signer is not allowed to perform this operation.
    #[error("unauthorized signer {signer}: expected {expected}")]
    Unauthorized {
        /// Who signed.
        signer: Pubkey,
        /// Who had to sign.
        expected: Pubkey,
    },

    /// The zero identity cannot sign.
    #[error("invalid signer: the zero identity cannot sign")]
    InvalidSigner,

    /// The account holds the other record kind, or is owned by another program.
    #[error("account {address} does not hold {expected} data")]
    AccountTypeMismatch {
        /// Target account.
        address: Pubkey,
        /// Record kind the operation needs.
        expected: RecordKind,
    },

    /// The account bytes could not be decoded.
    #[error("invalid account data: {0}")]
    InvalidAccountData(String),

    /// The encoded record does not fit the space allocated at creation.
    #[error("account data too small: need {needed} bytes, have {available}")]
    AccountDataTooSmall {
        /// Bytes the encoded record needs.
        needed: usize,
        /// Bytes allocated.
        available: usize,
    },

    /// A record invariant would not hold after the transition.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Failure inside the storage environment.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl ArkError {
    /// Stable machine-readable name for response payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized { .. } => "AlreadyInitialized",
            Self::CapacityExceeded { .. } => "CapacityExceeded",
            Self::DuplicateEntry { .. } => "DuplicateEntry",
            Self::Overflow { .. } => "Overflow",
            Self::MissingRecord { .. } => "MissingRecord",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::InvalidSigner => "InvalidSigner",
            Self::AccountTypeMismatch { .. } => "AccountTypeMismatch",
            Self::InvalidAccountData(_) => "InvalidAccountData",
            Self::AccountDataTooSmall { .. } => "AccountDataTooSmall",
            Self::InvariantViolation(_) => "InvariantViolation",
            Self::Storage(_) => "Storage",
        }
    }

    /// Returns true for errors raised by caller input rather than by a
    /// corrupted account or a failing storage backend.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            Self::InvalidAccountData(_)
                | Self::AccountDataTooSmall { .. }
                | Self::InvariantViolation(_)
                | Self::Storage(_)
        )
    }
}

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Errors raised by an [`AccountStore`](crate::ports::outbound::AccountStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Nothing is stored at the address.
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// An account already exists at the address.
    #[error("account already in use: {0}")]
    AccountAlreadyInUse(Pubkey),

    /// A write tried to resize fixed-size account data.
    #[error("account {address} data length is fixed at {expected} bytes, got {actual}")]
    DataLengthChanged {
        /// Account written.
        address: Pubkey,
        /// Length fixed at creation.
        expected: usize,
        /// Length the write produced.
        actual: usize,
    },

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for ArkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(address) => ArkError::MissingRecord { address },
            StoreError::AccountAlreadyInUse(address) => ArkError::AlreadyInitialized { address },
            other => ArkError::Storage(other),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
