//! # Account Codec
//!
//! Account data layout:
//!
//! | Offset | Bytes | Content                                        |
//! |--------|-------|------------------------------------------------|
//! | 0      | 8     | discriminator, `sha256("account:<Name>")[..8]` |
//! | 8      | n     | bincode-encoded record                         |
//! | 8 + n  | rest  | zero padding up to the allocated size          |
//!
//! Decoding checks owner and discriminator before touching the body, then
//! checks the data length against the space implied by the record's
//! capacities and re-validates the record invariants.

use super::entities::{Account, AnalyticsRecord, ArkRecord, EscrowRecord};
use super::invariants;
use super::value_objects::{Pubkey, RecordKind};
use crate::errors::ArkError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Bytes reserved for the discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// A record type that can live in a program-owned account.
pub trait ProgramAccount: Clone + Serialize + DeserializeOwned {
    /// Which record this is; selects the discriminator.
    const KIND: RecordKind;

    /// Creator recorded at initialization.
    fn authority(&self) -> &Pubkey;

    /// Account size for this record's persisted capacities.
    fn space(&self) -> usize;

    /// Record-level invariants.
    fn check_invariants(&self) -> Result<(), ArkError>;

    /// Checks that `after` is a legal successor of `before`.
    fn check_transition(before: &Self, after: &Self) -> Result<(), ArkError>;

    /// Wraps the record into the response snapshot type.
    fn into_record(self) -> ArkRecord;
}

impl ProgramAccount for AnalyticsRecord {
    const KIND: RecordKind = RecordKind::Analytics;

    fn authority(&self) -> &Pubkey {
        &self.authority
    }

    fn space(&self) -> usize {
        account_space(Self::max_encoded_len(self.governments.capacity()))
    }

    fn check_invariants(&self) -> Result<(), ArkError> {
        invariants::into_result(invariants::analytics_violations(self))
    }

    fn check_transition(before: &Self, after: &Self) -> Result<(), ArkError> {
        invariants::into_result(invariants::analytics_transition_violations(before, after))
    }

    fn into_record(self) -> ArkRecord {
        ArkRecord::Analytics(self)
    }
}

impl ProgramAccount for EscrowRecord {
    const KIND: RecordKind = RecordKind::Escrow;

    fn authority(&self) -> &Pubkey {
        &self.authority
    }

    fn space(&self) -> usize {
        account_space(Self::max_encoded_len(
            self.trades.capacity(),
            self.services.capacity(),
        ))
    }

    fn check_invariants(&self) -> Result<(), ArkError> {
        invariants::into_result(invariants::escrow_violations(self))
    }

    fn check_transition(before: &Self, after: &Self) -> Result<(), ArkError> {
        invariants::into_result(invariants::escrow_transition_violations(before, after))
    }

    fn into_record(self) -> ArkRecord {
        ArkRecord::Escrow(self)
    }
}

/// Total account size for a record body of `body_len` bytes.
#[must_use]
pub const fn account_space(body_len: usize) -> usize {
    DISCRIMINATOR_LEN + body_len
}

/// Allocates an account of `space` bytes owned by `owner` holding `record`.
///
/// # Errors
///
/// `AccountDataTooSmall` if the encoded record does not fit.
pub fn new_account<R: ProgramAccount>(
    owner: Pubkey,
    record: &R,
    space: usize,
) -> Result<Account, ArkError> {
    let mut account = Account::new(owner, space);
    encode_into(record, &mut account.data)?;
    Ok(account)
}

/// Writes discriminator and record into `data`, zeroing the tail.
///
/// # Errors
///
/// `AccountDataTooSmall` if the encoded record does not fit; `data` is left
/// untouched in that case.
pub fn encode_into<R: ProgramAccount>(record: &R, data: &mut [u8]) -> Result<(), ArkError> {
    let body =
        bincode::serialize(record).map_err(|e| ArkError::InvalidAccountData(e.to_string()))?;
    let needed = account_space(body.len());
    if needed > data.len() {
        return Err(ArkError::AccountDataTooSmall {
            needed,
            available: data.len(),
        });
    }

    data[..DISCRIMINATOR_LEN].copy_from_slice(&R::KIND.discriminator());
    data[DISCRIMINATOR_LEN..needed].copy_from_slice(&body);
    data[needed..].fill(0);
    Ok(())
}

/// Reads a record of type `R` from `account`.
///
/// # Errors
///
/// - `AccountTypeMismatch`: wrong owner or wrong discriminator
/// - `InvalidAccountData`: body does not decode, or the data length differs
///   from the record's space
/// - `InvariantViolation`: decoded record is inconsistent
pub fn decode<R: ProgramAccount>(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> Result<R, ArkError> {
    let mismatch = || ArkError::AccountTypeMismatch {
        address: *address,
        expected: R::KIND,
    };

    if account.owner != *program_id || account.data.len() < DISCRIMINATOR_LEN {
        return Err(mismatch());
    }
    if account.data[..DISCRIMINATOR_LEN] != R::KIND.discriminator() {
        return Err(mismatch());
    }

    let record: R = bincode::deserialize(&account.data[DISCRIMINATOR_LEN..])
        .map_err(|e| ArkError::InvalidAccountData(e.to_string()))?;
    if account.data.len() != record.space() {
        return Err(ArkError::InvalidAccountData(format!(
            "account {address} holds {} bytes, expected {}",
            account.data.len(),
            record.space()
        )));
    }
    record.check_invariants()?;
    Ok(record)
}
