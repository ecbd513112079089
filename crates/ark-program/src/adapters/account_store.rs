//! # In-Memory Account Store
//!
//! The whole ledger behind one `parking_lot::RwLock`. `transact` holds the
//! write lock from read to commit, so writers are serialized and readers
//! never see a half-applied operation.

use crate::domain::entities::Account;
use crate::domain::value_objects::Pubkey;
use crate::errors::{ArkError, StoreError};
use crate::ports::outbound::AccountStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::trace;

/// In-memory account storage.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Pubkey, Account>>,
}

impl InMemoryAccountStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Addresses of all stored accounts, sorted.
    #[must_use]
    pub fn addresses(&self) -> Vec<Pubkey> {
        let mut addresses: Vec<Pubkey> = self.accounts.read().keys().copied().collect();
        addresses.sort();
        addresses
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().get(address).cloned())
    }

    fn create_account(&self, address: Pubkey, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&address) {
            return Err(StoreError::AccountAlreadyInUse(address));
        }
        trace!(%address, space = account.data.len(), "Account created");
        accounts.insert(address, account);
        Ok(())
    }

    fn transact(
        &self,
        address: &Pubkey,
        apply: &mut dyn FnMut(&mut Account) -> Result<(), ArkError>,
    ) -> Result<(), ArkError> {
        let mut accounts = self.accounts.write();
        let stored = accounts
            .get_mut(address)
            .ok_or(StoreError::AccountNotFound(*address))?;

        let mut working = stored.clone();
        apply(&mut working)?;

        if working.data.len() != stored.data.len() {
            return Err(StoreError::DataLengthChanged {
                address: *address,
                expected: stored.data.len(),
                actual: working.data.len(),
            }
            .into());
        }
        stored.data = working.data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Pubkey {
        Pubkey::new([1u8; 32])
    }

    fn owner() -> Pubkey {
        Pubkey::new([2u8; 32])
    }

    #[test]
    fn test_create_and_get() {
        let store = InMemoryAccountStore::new();
        assert!(store.is_empty());
        store
            .create_account(address(), Account::new(owner(), 4))
            .unwrap();

        let account = store.get_account(&address()).unwrap().unwrap();
        assert_eq!(account.owner, owner());
        assert_eq!(account.data, vec![0u8; 4]);
        assert_eq!(store.len(), 1);
        assert!(store.get_account(&owner()).unwrap().is_none());
    }

    #[test]
    fn test_create_twice_fails() {
        let store = InMemoryAccountStore::new();
        store
            .create_account(address(), Account::new(owner(), 4))
            .unwrap();
        let err = store
            .create_account(address(), Account::new(owner(), 8))
            .unwrap_err();
        assert_eq!(err, StoreError::AccountAlreadyInUse(address()));
        assert_eq!(store.get_account(&address()).unwrap().unwrap().data.len(), 4);
    }

    #[test]
    fn test_transact_commits_on_success() {
        let store = InMemoryAccountStore::new();
        store
            .create_account(address(), Account::new(owner(), 4))
            .unwrap();

        store
            .transact(&address(), &mut |account| {
                account.data[0] = 7;
                Ok(())
            })
            .unwrap();
        assert_eq!(store.get_account(&address()).unwrap().unwrap().data[0], 7);
    }

    #[test]
    fn test_transact_discards_on_error() {
        let store = InMemoryAccountStore::new();
        store
            .create_account(address(), Account::new(owner(), 4))
            .unwrap();

        let err = store
            .transact(&address(), &mut |account| {
                account.data[0] = 7;
                Err(ArkError::InvalidSigner)
            })
            .unwrap_err();
        assert_eq!(err, ArkError::InvalidSigner);
        assert_eq!(store.get_account(&address()).unwrap().unwrap().data[0], 0);
    }

    #[test]
    fn test_transact_rejects_resize() {
        let store = InMemoryAccountStore::new();
        store
            .create_account(address(), Account::new(owner(), 4))
            .unwrap();

        let err = store
            .transact(&address(), &mut |account| {
                account.data.push(1);
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ArkError::Storage(StoreError::DataLengthChanged {
                expected: 4,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_transact_missing_account() {
        let store = InMemoryAccountStore::new();
        let err = store
            .transact(&address(), &mut |_| Ok(()))
            .unwrap_err();
        assert_eq!(err, ArkError::MissingRecord { address: address() });
    }
}
