//! # The Ark Program - Analytics and Escrow Registry
//!
//! A ledger-resident program keeping two kinds of records:
//!
//! - **AnalyticsRecord**: registered governments plus poll tallies and points
//! - **EscrowRecord**: registered trades and services
//!
//! Records live in fixed-size accounts owned by the program. Every operation
//! is one atomic read-modify-write of one account.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Counter equals paired list length | `domain/invariants.rs` - `invariant_government_count()`, `invariant_escrow_counts()` |
//! | `poll_count == approved_count + rejected_count` | `domain/invariants.rs` - `invariant_poll_tally()` |
//! | Lists never exceed declared capacity | `domain/bounded.rs` - `BoundedList::try_push()` |
//! | Counters never decrease, lists only append | `domain/invariants.rs` - `*_transition_violations()` |
//! | All-or-nothing operations | `adapters/account_store.rs` - `InMemoryAccountStore::transact()` |
//!
//! ## Operations
//!
//! | Instruction | Record | Authorization |
//! |-------------|--------|---------------|
//! | `InitializeAnalytics` | Analytics | signer == authority |
//! | `InitializeEscrow` | Escrow | signer == authority |
//! | `RegisterGovernment` | Analytics | [`RegistrationPolicy`](config::RegistrationPolicy) |
//! | `UpdateAnalytics` | Analytics | [`RegistrationPolicy`](config::RegistrationPolicy) |
//! | `RegisterTrade` | Escrow | [`RegistrationPolicy`](config::RegistrationPolicy) |
//! | `RegisterService` | Escrow | [`RegistrationPolicy`](config::RegistrationPolicy) |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `AccountStore` | Account storage with atomic `transact` |
//! | `Clock` | Creation timestamps |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ark_program::prelude::*;
//!
//! let program = create_test_program();
//! let creator = Pubkey::new_unique();
//! let analytics = Pubkey::new_unique();
//!
//! program.process(ArkRequest::new(
//!     creator,
//!     analytics,
//!     ArkInstruction::InitializeAnalytics { authority: creator },
//! )).await?;
//!
//! let record = program.fetch_analytics(analytics).await?;
//! assert_eq!(record.poll_count, 0);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ipc;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Account, AnalyticsRecord, ArkRecord, EscrowRecord,
    };

    // Value objects
    pub use crate::domain::bounded::BoundedList;
    pub use crate::domain::value_objects::{ListKind, Pubkey, RecordKind};

    // Configuration
    pub use crate::config::{ArkConfig, ConfigError, DuplicatePolicy, RegistrationPolicy};

    // Ports
    pub use crate::ports::inbound::{ArkInstruction, ArkProgramApi, ArkRequest, ArkResponse};
    pub use crate::ports::outbound::{AccountStore, Clock};

    // Events
    pub use crate::events::ArkEvent;

    // Errors
    pub use crate::errors::{ArkError, StoreError};

    // IPC
    pub use crate::ipc::{
        ArkHandler, ArkRequestPayload, ArkResponsePayload, ErrorPayload, FetchRecordPayload,
    };

    // Adapters
    pub use crate::adapters::{FixedClock, InMemoryAccountStore, SystemClock};

    // Service
    pub use crate::service::{create_test_program, ArkProgram, ProgramStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
