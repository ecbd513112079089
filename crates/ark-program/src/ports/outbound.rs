//! Outbound Ports (Driven Ports / SPI)
//!
//! What the program needs from its storage environment.

use crate::domain::entities::Account;
use crate::domain::value_objects::Pubkey;
use crate::errors::{ArkError, StoreError};

/// Account storage.
///
/// Implementations must make [`transact`](AccountStore::transact) atomic:
/// concurrent transactions on one address run in some serial order and a
/// failed transaction leaves no trace.
pub trait AccountStore: Send + Sync {
    /// Reads a copy of the account at `address`.
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, StoreError>;

    /// Stores a new account.
    ///
    /// Fails with `AccountAlreadyInUse` if `address` is taken.
    fn create_account(&self, address: Pubkey, account: Account) -> Result<(), StoreError>;

    /// Runs `apply` on a working copy of the account and commits the copy's
    /// data only if `apply` returns `Ok`.
    ///
    /// The data length is fixed: a copy whose length changed is rejected
    /// with `DataLengthChanged`. A missing account yields `MissingRecord`.
    fn transact(
        &self,
        address: &Pubkey,
        apply: &mut dyn FnMut(&mut Account) -> Result<(), ArkError>,
    ) -> Result<(), ArkError>;
}

/// Source of the timestamp stamped into new records.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds.
    fn unix_timestamp(&self) -> i64;
}
