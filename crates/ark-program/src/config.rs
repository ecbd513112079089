//! Configuration for the Ark program

use crate::domain::value_objects::{ListKind, Pubkey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard limits that configuration cannot raise.
pub mod limits {
    /// Largest account data the storage environment will allocate (10 MiB).
    pub const MAX_ACCOUNT_DATA_LEN: usize = 10 * 1024 * 1024;

    /// Default capacity of every bounded list.
    pub const DEFAULT_LIST_CAPACITY: u32 = 10;

    /// Seed the default program id is derived from.
    pub const DEFAULT_PROGRAM_SEED: &[u8] = b"the-ark";
}

/// Who may register entries into an initialized record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Any non-zero signer.
    #[default]
    Open,
    /// Only the authority stored in the record.
    AuthorityOnly,
}

/// Whether a list accepts an identity that is already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Append regardless.
    Allow,
    /// Fail with `DuplicateEntry`.
    Reject,
}

/// Program configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArkConfig {
    /// Owner written into every account this program creates.
    pub program_id: Pubkey,
    /// Capacity of `AnalyticsRecord::governments`.
    pub max_governments: u32,
    /// Capacity of `EscrowRecord::trades`.
    pub max_trades: u32,
    /// Capacity of `EscrowRecord::services`.
    pub max_services: u32,
    /// Who may call the register operations.
    pub registration_policy: RegistrationPolicy,
    /// Duplicate handling for governments.
    pub government_duplicates: DuplicatePolicy,
    /// Duplicate handling for trades.
    pub trade_duplicates: DuplicatePolicy,
    /// Duplicate handling for services.
    pub service_duplicates: DuplicatePolicy,
    /// Points awarded per recorded poll.
    pub points_per_poll: u64,
}

impl Default for ArkConfig {
    fn default() -> Self {
        Self {
            program_id: Pubkey::from_seed(limits::DEFAULT_PROGRAM_SEED),
            max_governments: limits::DEFAULT_LIST_CAPACITY,
            max_trades: limits::DEFAULT_LIST_CAPACITY,
            max_services: limits::DEFAULT_LIST_CAPACITY,
            registration_policy: RegistrationPolicy::Open,
            government_duplicates: DuplicatePolicy::Reject,
            trade_duplicates: DuplicatePolicy::Allow,
            service_duplicates: DuplicatePolicy::Allow,
            points_per_poll: 1,
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A list capacity of zero would make every registration fail.
    #[error("{list} capacity must be at least 1")]
    ZeroCapacity {
        /// List configured with zero capacity.
        list: ListKind,
    },

    /// The resulting account would exceed the allocation limit.
    #[error("account of {size} bytes exceeds limit of {limit} bytes")]
    AccountTooLarge {
        /// Computed account size.
        size: usize,
        /// Maximum allowed.
        limit: usize,
    },

    /// The zero identity cannot own accounts.
    #[error("program_id must not be the zero identity")]
    ZeroProgramId,
}

impl ArkConfig {
    /// Duplicate policy for a list.
    #[must_use]
    pub fn duplicates_for(&self, list: ListKind) -> DuplicatePolicy {
        match list {
            ListKind::Governments => self.government_duplicates,
            ListKind::Trades => self.trade_duplicates,
            ListKind::Services => self.service_duplicates,
        }
    }

    /// Account size of an analytics record under this configuration.
    #[must_use]
    pub fn analytics_space(&self) -> usize {
        crate::domain::codec::account_space(crate::domain::AnalyticsRecord::max_encoded_len(
            self.max_governments,
        ))
    }

    /// Account size of an escrow record under this configuration.
    #[must_use]
    pub fn escrow_space(&self) -> usize {
        crate::domain::codec::account_space(crate::domain::EscrowRecord::max_encoded_len(
            self.max_trades,
            self.max_services,
        ))
    }

    /// Rejects configurations the program cannot run with.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_id.is_zero() {
            return Err(ConfigError::ZeroProgramId);
        }
        for (list, capacity) in [
            (ListKind::Governments, self.max_governments),
            (ListKind::Trades, self.max_trades),
            (ListKind::Services, self.max_services),
        ] {
            if capacity == 0 {
                return Err(ConfigError::ZeroCapacity { list });
            }
        }
        for size in [self.analytics_space(), self.escrow_space()] {
            if size > limits::MAX_ACCOUNT_DATA_LEN {
                return Err(ConfigError::AccountTooLarge {
                    size,
                    limit: limits::MAX_ACCOUNT_DATA_LEN,
                });
            }
        }
        Ok(())
    }
}
