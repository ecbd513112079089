//! # Ark Program Service
//!
//! The operation dispatcher. For every request it:
//!
//! 1. Rejects the zero signer
//! 2. Authorizes (creator check for initializers, [`RegistrationPolicy`] otherwise)
//! 3. Applies the operation to a decoded copy of the record
//! 4. Re-checks record invariants and the before/after transition
//! 5. Re-encodes into the account and lets the store commit
//!
//! Steps 2 to 5 of a mutating operation run inside one
//! [`AccountStore::transact`] call, so a request is applied in full or
//! not at all.

use crate::adapters::{FixedClock, InMemoryAccountStore};
use crate::config::{ArkConfig, RegistrationPolicy};
use crate::domain::codec::{self, ProgramAccount};
use crate::domain::entities::{AnalyticsRecord, EscrowRecord};
use crate::domain::value_objects::{ListKind, Pubkey};
use crate::errors::ArkError;
use crate::events::ArkEvent;
use crate::ports::inbound::{ArkInstruction, ArkProgramApi, ArkRequest, ArkResponse};
use crate::ports::outbound::{AccountStore, Clock};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Timestamp used by [`create_test_program`].
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Statistics for the Ark program.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStats {
    /// Requests dispatched.
    pub requests_processed: u64,
    /// Requests committed.
    pub requests_succeeded: u64,
    /// Requests that failed for any reason.
    pub requests_failed: u64,
    /// Failures due to `Unauthorized` or `InvalidSigner`.
    pub rejected_signers: u64,
    /// Events emitted by committed requests.
    pub events_emitted: u64,
}

/// The Ark program.
///
/// Holds no record state itself; every record lives in the account store.
pub struct ArkProgram<S: AccountStore, C: Clock> {
    /// Program configuration.
    config: ArkConfig,
    /// Account storage.
    store: Arc<S>,
    /// Timestamp source for new records.
    clock: C,
    /// Program statistics.
    stats: RwLock<ProgramStats>,
}

impl<S: AccountStore, C: Clock> ArkProgram<S, C> {
    /// Create a new program.
    ///
    /// The configuration is used as given; call [`ArkConfig::validate`] first.
    pub fn new(store: Arc<S>, clock: C, config: ArkConfig) -> Self {
        Self {
            config,
            store,
            clock,
            stats: RwLock::new(ProgramStats::default()),
        }
    }

    /// Program configuration.
    pub fn config(&self) -> &ArkConfig {
        &self.config
    }

    /// Underlying account store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Get current program statistics.
    pub fn stats(&self) -> ProgramStats {
        self.stats.read().clone()
    }

    /// Dispatch one request.
    ///
    /// # Errors
    ///
    /// Any [`ArkError`]; nothing is committed when an error is returned.
    #[instrument(
        skip(self, request),
        fields(
            instruction = %request.instruction,
            target = %request.target,
            signer = %request.signer,
        )
    )]
    pub fn dispatch(&self, request: ArkRequest) -> Result<ArkResponse, ArkError> {
        let result = self.execute(&request);

        let mut stats = self.stats.write();
        stats.requests_processed += 1;
        match &result {
            Ok(response) => {
                stats.requests_succeeded += 1;
                stats.events_emitted += response.events.len() as u64;
                for event in &response.events {
                    debug!(topic = event.topic(), "Event emitted");
                }
                info!(events = response.events.len(), "Instruction applied");
            }
            Err(err) => {
                stats.requests_failed += 1;
                if matches!(
                    err,
                    ArkError::Unauthorized { .. } | ArkError::InvalidSigner
                ) {
                    stats.rejected_signers += 1;
                }
                warn!(error = %err, code = err.code(), "Instruction failed");
            }
        }
        result
    }

    /// Current analytics record at `address`.
    ///
    /// # Errors
    ///
    /// `MissingRecord`, or `AccountTypeMismatch` for an escrow account.
    pub fn read_analytics(&self, address: &Pubkey) -> Result<AnalyticsRecord, ArkError> {
        self.load(address)
    }

    /// Current escrow record at `address`.
    ///
    /// # Errors
    ///
    /// `MissingRecord`, or `AccountTypeMismatch` for an analytics account.
    pub fn read_escrow(&self, address: &Pubkey) -> Result<EscrowRecord, ArkError> {
        self.load(address)
    }

    fn load<R: ProgramAccount>(&self, address: &Pubkey) -> Result<R, ArkError> {
        let account = self
            .store
            .get_account(address)?
            .ok_or(ArkError::MissingRecord { address: *address })?;
        codec::decode(address, &account, &self.config.program_id)
    }

    fn execute(&self, request: &ArkRequest) -> Result<ArkResponse, ArkError> {
        if request.signer.is_zero() {
            return Err(ArkError::InvalidSigner);
        }

        let signer = request.signer;
        let target = request.target;
        match request.instruction {
            ArkInstruction::InitializeAnalytics { authority } => {
                self.initialize_analytics(signer, target, authority)
            }
            ArkInstruction::InitializeEscrow { authority } => {
                self.initialize_escrow(signer, target, authority)
            }
            ArkInstruction::RegisterGovernment { government } => {
                self.register_government(signer, target, government)
            }
            ArkInstruction::RegisterTrade { trade } => self.register_trade(signer, target, trade),
            ArkInstruction::RegisterService { service } => {
                self.register_service(signer, target, service)
            }
            ArkInstruction::UpdateAnalytics { approved } => {
                self.update_analytics(signer, target, approved)
            }
        }
    }

    // =========================================================================
    // INITIALIZERS
    // =========================================================================

    fn initialize_analytics(
        &self,
        signer: Pubkey,
        address: Pubkey,
        authority: Pubkey,
    ) -> Result<ArkResponse, ArkError> {
        authorize_creator(&signer, &authority)?;

        let created_at = self.clock.unix_timestamp();
        let record = AnalyticsRecord::new(authority, self.config.max_governments, created_at);
        self.create(address, &record, self.config.analytics_space())?;

        Ok(ArkResponse {
            events: vec![ArkEvent::AnalyticsInitialized {
                address,
                authority,
                created_at,
            }],
            record: record.into_record(),
        })
    }

    fn initialize_escrow(
        &self,
        signer: Pubkey,
        address: Pubkey,
        authority: Pubkey,
    ) -> Result<ArkResponse, ArkError> {
        authorize_creator(&signer, &authority)?;

        let created_at = self.clock.unix_timestamp();
        let record = EscrowRecord::new(
            authority,
            self.config.max_trades,
            self.config.max_services,
            created_at,
        );
        self.create(address, &record, self.config.escrow_space())?;

        Ok(ArkResponse {
            events: vec![ArkEvent::EscrowInitialized {
                address,
                authority,
                created_at,
            }],
            record: record.into_record(),
        })
    }

    fn create<R: ProgramAccount>(
        &self,
        address: Pubkey,
        record: &R,
        space: usize,
    ) -> Result<(), ArkError> {
        let account = codec::new_account(self.config.program_id, record, space)?;
        self.store.create_account(address, account)?;
        Ok(())
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    fn register_government(
        &self,
        signer: Pubkey,
        address: Pubkey,
        government: Pubkey,
    ) -> Result<ArkResponse, ArkError> {
        let duplicates = self.config.duplicates_for(ListKind::Governments);
        let (record, index) = self.mutate(address, signer, |record: &mut AnalyticsRecord| {
            record.register_government(government, duplicates)
        })?;

        Ok(ArkResponse {
            events: vec![ArkEvent::GovernmentRegistered {
                address,
                government,
                payer: signer,
                program_id: self.config.program_id,
                index,
            }],
            record: record.into_record(),
        })
    }

    fn register_trade(
        &self,
        signer: Pubkey,
        address: Pubkey,
        trade: Pubkey,
    ) -> Result<ArkResponse, ArkError> {
        let duplicates = self.config.duplicates_for(ListKind::Trades);
        let (record, index) = self.mutate(address, signer, |record: &mut EscrowRecord| {
            record.register_trade(trade, duplicates)
        })?;

        Ok(ArkResponse {
            events: vec![ArkEvent::TradeRegistered {
                address,
                trade,
                index,
            }],
            record: record.into_record(),
        })
    }

    fn register_service(
        &self,
        signer: Pubkey,
        address: Pubkey,
        service: Pubkey,
    ) -> Result<ArkResponse, ArkError> {
        let duplicates = self.config.duplicates_for(ListKind::Services);
        let (record, index) = self.mutate(address, signer, |record: &mut EscrowRecord| {
            record.register_service(service, duplicates)
        })?;

        Ok(ArkResponse {
            events: vec![ArkEvent::ServiceRegistered {
                address,
                service,
                index,
            }],
            record: record.into_record(),
        })
    }

    fn update_analytics(
        &self,
        signer: Pubkey,
        address: Pubkey,
        approved: bool,
    ) -> Result<ArkResponse, ArkError> {
        let points_per_poll = self.config.points_per_poll;
        let (record, ()) = self.mutate(address, signer, |record: &mut AnalyticsRecord| {
            record.record_poll(approved, points_per_poll)
        })?;

        Ok(ArkResponse {
            events: vec![ArkEvent::AnalyticsUpdated {
                address,
                approved,
                poll_count: record.poll_count,
                points: record.points,
            }],
            record: record.into_record(),
        })
    }

    /// Read-modify-write of one record inside a store transaction.
    ///
    /// Returns the committed record and whatever `op` returned.
    fn mutate<R, T>(
        &self,
        address: Pubkey,
        signer: Pubkey,
        mut op: impl FnMut(&mut R) -> Result<T, ArkError>,
    ) -> Result<(R, T), ArkError>
    where
        R: ProgramAccount,
    {
        let program_id = self.config.program_id;
        let policy = self.config.registration_policy;
        let mut committed = None;

        self.store.transact(&address, &mut |account| {
            let before: R = codec::decode(&address, account, &program_id)?;
            authorize_registration(policy, &signer, before.authority())?;

            let mut after = before.clone();
            let value = op(&mut after)?;
            after.check_invariants()?;
            R::check_transition(&before, &after)?;

            codec::encode_into(&after, &mut account.data)?;
            committed = Some((after, value));
            Ok(())
        })?;

        committed.ok_or_else(|| {
            ArkError::InvariantViolation("store committed without running the transaction".into())
        })
    }
}

/// Initializers must be signed by the designated creator.
fn authorize_creator(signer: &Pubkey, authority: &Pubkey) -> Result<(), ArkError> {
    if signer != authority {
        return Err(ArkError::Unauthorized {
            signer: *signer,
            expected: *authority,
        });
    }
    Ok(())
}

fn authorize_registration(
    policy: RegistrationPolicy,
    signer: &Pubkey,
    authority: &Pubkey,
) -> Result<(), ArkError> {
    match policy {
        RegistrationPolicy::Open => Ok(()),
        RegistrationPolicy::AuthorityOnly => authorize_creator(signer, authority),
    }
}

/// Create a program with in-memory adapters (for testing).
#[must_use]
pub fn create_test_program() -> ArkProgram<InMemoryAccountStore, FixedClock> {
    ArkProgram::new(
        Arc::new(InMemoryAccountStore::new()),
        FixedClock::new(TEST_TIMESTAMP),
        ArkConfig::default(),
    )
}

// =============================================================================
// ArkProgramApi Implementation
// =============================================================================

#[async_trait]
impl<S: AccountStore, C: Clock> ArkProgramApi for ArkProgram<S, C> {
    async fn process(&self, request: ArkRequest) -> Result<ArkResponse, ArkError> {
        self.dispatch(request)
    }

    async fn fetch_analytics(&self, address: Pubkey) -> Result<AnalyticsRecord, ArkError> {
        self.read_analytics(&address)
    }

    async fn fetch_escrow(&self, address: Pubkey) -> Result<EscrowRecord, ArkError> {
        self.read_escrow(&address)
    }

    fn program_id(&self) -> Pubkey {
        self.config.program_id
    }
}

// =============================================================================
// TESTS
// =============================================================================
