//! # Core Domain Entities
//!
//! The records the program persists and the account that carries them.
//!
//! Each mutating method validates everything up front and only then writes,
//! so a failed call leaves the record exactly as it was.

use crate::config::DuplicatePolicy;
use crate::domain::bounded::{self, BoundedList};
use crate::domain::counters::{checked_add, increment};
use crate::domain::value_objects::{ListKind, Pubkey, RecordKind};
use crate::errors::ArkError;
use serde::{Deserialize, Serialize};

// =============================================================================
// ACCOUNT
// =============================================================================

/// A storage-environment account: owner program plus fixed-length data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    /// Program that may write this account.
    pub owner: Pubkey,
    /// Discriminator followed by the encoded record, zero padded.
    pub data: Vec<u8>,
}

impl Account {
    /// Allocates a zeroed account of `space` bytes.
    #[must_use]
    pub fn new(owner: Pubkey, space: usize) -> Self {
        Self {
            owner,
            data: vec![0u8; space],
        }
    }
}

// =============================================================================
// SHARED APPEND
// =============================================================================

/// Appends `identity` to `list` and bumps its paired `counter`.
///
/// Order of checks: capacity, duplicate policy, counter overflow. Nothing is
/// written until all three pass.
fn append_identity(
    list: &mut BoundedList<Pubkey>,
    counter: &mut u64,
    identity: Pubkey,
    kind: ListKind,
    field: &'static str,
    duplicates: DuplicatePolicy,
) -> Result<u64, ArkError> {
    if list.is_full() {
        return Err(ArkError::CapacityExceeded {
            list: kind,
            capacity: list.capacity(),
        });
    }
    if duplicates == DuplicatePolicy::Reject && list.contains(&identity) {
        return Err(ArkError::DuplicateEntry {
            list: kind,
            identity,
        });
    }
    let next = increment(*counter, field)?;

    list.try_push(identity)
        .map_err(|full| ArkError::CapacityExceeded {
            list: kind,
            capacity: full.capacity,
        })?;
    *counter = next;
    Ok(next - 1)
}

// =============================================================================
// ANALYTICS RECORD
// =============================================================================

/// Global analytics: registered governments and poll tallies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    /// Creator recorded at initialization.
    pub authority: Pubkey,
    /// Always equals `governments.len()`.
    pub government_count: u64,
    /// Registered government identities, in registration order.
    pub governments: BoundedList<Pubkey>,
    /// Always equals `approved_count + rejected_count`.
    pub poll_count: u64,
    /// Polls recorded as approved.
    pub approved_count: u64,
    /// Polls recorded as rejected.
    pub rejected_count: u64,
    /// Score, never decreases.
    pub points: u64,
    /// Unix timestamp of initialization.
    pub created_at: i64,
}

impl AnalyticsRecord {
    /// Encoded size of everything except the government list.
    pub const FIXED_LEN: usize = Pubkey::LEN // authority
        + 8 * 5 // government_count, poll_count, approved_count, rejected_count, points
        + 8; // created_at

    /// A zeroed record.
    #[must_use]
    pub fn new(authority: Pubkey, max_governments: u32, created_at: i64) -> Self {
        Self {
            authority,
            government_count: 0,
            governments: BoundedList::with_capacity(max_governments),
            poll_count: 0,
            approved_count: 0,
            rejected_count: 0,
            points: 0,
            created_at,
        }
    }

    /// Encoded size once the government list is full.
    #[must_use]
    pub fn max_encoded_len(max_governments: u32) -> usize {
        Self::FIXED_LEN + bounded::max_encoded_len(max_governments, Pubkey::LEN)
    }

    /// Registers a government identity. Returns its index.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded`, `DuplicateEntry` (under `Reject`), `Overflow`.
    pub fn register_government(
        &mut self,
        government: Pubkey,
        duplicates: DuplicatePolicy,
    ) -> Result<u64, ArkError> {
        append_identity(
            &mut self.governments,
            &mut self.government_count,
            government,
            ListKind::Governments,
            "government_count",
            duplicates,
        )
    }

    /// Records one poll outcome and awards `points_per_poll`.
    ///
    /// # Errors
    ///
    /// `Overflow` if any of the touched counters would wrap.
    pub fn record_poll(&mut self, approved: bool, points_per_poll: u64) -> Result<(), ArkError> {
        let poll_count = increment(self.poll_count, "poll_count")?;
        let (approved_count, rejected_count) = if approved {
            (increment(self.approved_count, "approved_count")?, self.rejected_count)
        } else {
            (self.approved_count, increment(self.rejected_count, "rejected_count")?)
        };
        let points = checked_add(self.points, points_per_poll, "points")?;

        self.poll_count = poll_count;
        self.approved_count = approved_count;
        self.rejected_count = rejected_count;
        self.points = points;
        Ok(())
    }
}

// =============================================================================
// ESCROW RECORD
// =============================================================================

/// Escrow registry: trades and services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Creator recorded at initialization.
    pub authority: Pubkey,
    /// Always equals `trades.len()`.
    pub total_trades: u64,
    /// Registered trade identities.
    pub trades: BoundedList<Pubkey>,
    /// Always equals `services.len()`.
    pub total_services: u64,
    /// Registered service identities.
    pub services: BoundedList<Pubkey>,
    /// Reserved accumulator; no operation increments it.
    pub total_fees_collected: u64,
    /// Reserved accumulator; no operation increments it.
    pub total_amount_transferred: u64,
    /// Unix timestamp of initialization.
    pub created_at: i64,
}

impl EscrowRecord {
    /// Encoded size of everything except the two lists.
    pub const FIXED_LEN: usize = Pubkey::LEN // authority
        + 8 * 4 // total_trades, total_services, total_fees_collected, total_amount_transferred
        + 8; // created_at

    /// A zeroed record.
    #[must_use]
    pub fn new(authority: Pubkey, max_trades: u32, max_services: u32, created_at: i64) -> Self {
        Self {
            authority,
            total_trades: 0,
            trades: BoundedList::with_capacity(max_trades),
            total_services: 0,
            services: BoundedList::with_capacity(max_services),
            total_fees_collected: 0,
            total_amount_transferred: 0,
            created_at,
        }
    }

    /// Encoded size once both lists are full.
    #[must_use]
    pub fn max_encoded_len(max_trades: u32, max_services: u32) -> usize {
        Self::FIXED_LEN
            + bounded::max_encoded_len(max_trades, Pubkey::LEN)
            + bounded::max_encoded_len(max_services, Pubkey::LEN)
    }

    /// Registers a trade identity. Returns its index.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded`, `DuplicateEntry` (under `Reject`), `Overflow`.
    pub fn register_trade(
        &mut self,
        trade: Pubkey,
        duplicates: DuplicatePolicy,
    ) -> Result<u64, ArkError> {
        append_identity(
            &mut self.trades,
            &mut self.total_trades,
            trade,
            ListKind::Trades,
            "total_trades",
            duplicates,
        )
    }

    /// Registers a service identity. Returns its index.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded`, `DuplicateEntry` (under `Reject`), `Overflow`.
    pub fn register_service(
        &mut self,
        service: Pubkey,
        duplicates: DuplicatePolicy,
    ) -> Result<u64, ArkError> {
        append_identity(
            &mut self.services,
            &mut self.total_services,
            service,
            ListKind::Services,
            "total_services",
            duplicates,
        )
    }
}

// =============================================================================
// RECORD SNAPSHOT
// =============================================================================

/// Either record, as returned to callers after an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArkRecord {
    /// An analytics record.
    Analytics(AnalyticsRecord),
    /// An escrow record.
    Escrow(EscrowRecord),
}

impl ArkRecord {
    /// Which record type this is.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Analytics(_) => RecordKind::Analytics,
            Self::Escrow(_) => RecordKind::Escrow,
        }
    }

    /// The analytics record, if this is one.
    #[must_use]
    pub fn as_analytics(&self) -> Option<&AnalyticsRecord> {
        match self {
            Self::Analytics(record) => Some(record),
            Self::Escrow(_) => None,
        }
    }

    /// The escrow record, if this is one.
    #[must_use]
    pub fn as_escrow(&self) -> Option<&EscrowRecord> {
        match self {
            Self::Escrow(record) => Some(record),
            Self::Analytics(_) => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
