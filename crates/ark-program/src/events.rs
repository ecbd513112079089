//! # Program Events
//!
//! Emitted by successful operations and returned in the response that
//! produced them. A failed operation emits nothing.
//!
//! | Event | Emitted by |
//! |-------|------------|
//! | `AnalyticsInitialized` | `InitializeAnalytics` |
//! | `EscrowInitialized` | `InitializeEscrow` |
//! | `GovernmentRegistered` | `RegisterGovernment` |
//! | `TradeRegistered` | `RegisterTrade` |
//! | `ServiceRegistered` | `RegisterService` |
//! | `AnalyticsUpdated` | `UpdateAnalytics` |

use crate::domain::value_objects::Pubkey;
use serde::{Deserialize, Serialize};

/// Events emitted by the Ark program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ArkEvent {
    /// A new analytics record was created.
    AnalyticsInitialized {
        /// Record address.
        address: Pubkey,
        /// Creator.
        authority: Pubkey,
        /// Clock reading at creation.
        created_at: i64,
    },

    /// A new escrow record was created.
    EscrowInitialized {
        /// Record address.
        address: Pubkey,
        /// Creator.
        authority: Pubkey,
        /// Clock reading at creation.
        created_at: i64,
    },

    /// A government joined the registry.
    GovernmentRegistered {
        /// Analytics record address.
        address: Pubkey,
        /// Registered identity.
        government: Pubkey,
        /// Signer that paid for the registration.
        payer: Pubkey,
        /// Program that recorded it.
        program_id: Pubkey,
        /// Position in `governments`.
        index: u64,
    },

    /// A trade was registered.
    TradeRegistered {
        /// Escrow record address.
        address: Pubkey,
        /// Registered identity.
        trade: Pubkey,
        /// Position in `trades`.
        index: u64,
    },

    /// A service was registered.
    ServiceRegistered {
        /// Escrow record address.
        address: Pubkey,
        /// Registered identity.
        service: Pubkey,
        /// Position in `services`.
        index: u64,
    },

    /// A poll outcome was recorded.
    AnalyticsUpdated {
        /// Analytics record address.
        address: Pubkey,
        /// Outcome.
        approved: bool,
        /// `poll_count` after the update.
        poll_count: u64,
        /// `points` after the update.
        points: u64,
    },
}

impl ArkEvent {
    /// Short topic name, used as a log field.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::AnalyticsInitialized { .. } => "analytics_initialized",
            Self::EscrowInitialized { .. } => "escrow_initialized",
            Self::GovernmentRegistered { .. } => "government_registered",
            Self::TradeRegistered { .. } => "trade_registered",
            Self::ServiceRegistered { .. } => "service_registered",
            Self::AnalyticsUpdated { .. } => "analytics_updated",
        }
    }

    /// Address of the record the event concerns.
    #[must_use]
    pub fn address(&self) -> Pubkey {
        match self {
            Self::AnalyticsInitialized { address, .. }
            | Self::EscrowInitialized { address, .. }
            | Self::GovernmentRegistered { address, .. }
            | Self::TradeRegistered { address, .. }
            | Self::ServiceRegistered { address, .. }
            | Self::AnalyticsUpdated { address, .. } => *address,
        }
    }
}
