//! # Ark Runtime
//!
//! Wires the program to an in-memory ledger and replays request batches.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (TOML file, optional)
//! 2. Initialize logging from the environment
//! 3. Build the program with the configured clock
//! 4. Replay the request batch through the IPC handler
//! 5. Print the report as JSON

pub mod config;

use ark_program::adapters::{FixedClock, InMemoryAccountStore, SystemClock};
use ark_program::domain::{ArkRecord, ProgramAccount, Pubkey};
use ark_program::ipc::{ArkHandler, ArkRequestPayload, ArkResponsePayload};
use ark_program::ports::Clock;
use ark_program::service::{ArkProgram, ProgramStats};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

pub use config::{ClockConfig, ConfigLoadError, RuntimeConfig};

/// Clock selected by `[clock]`.
#[derive(Debug)]
pub enum RuntimeClock {
    /// Wall clock.
    System(SystemClock),
    /// Frozen at a configured timestamp.
    Fixed(FixedClock),
}

impl From<&ClockConfig> for RuntimeClock {
    fn from(config: &ClockConfig) -> Self {
        match config.fixed_timestamp {
            Some(now) => Self::Fixed(FixedClock::new(now)),
            None => Self::System(SystemClock),
        }
    }
}

impl Clock for RuntimeClock {
    fn unix_timestamp(&self) -> i64 {
        match self {
            Self::System(clock) => clock.unix_timestamp(),
            Self::Fixed(clock) => clock.unix_timestamp(),
        }
    }
}

/// The program type the runtime drives.
pub type RuntimeProgram = ArkProgram<InMemoryAccountStore, RuntimeClock>;

/// A record and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSnapshot {
    /// Account address.
    pub address: Pubkey,
    /// Decoded record.
    pub record: ArkRecord,
}

/// Result of replaying one batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One response per request, in request order.
    pub responses: Vec<ArkResponsePayload>,
    /// Every record in the ledger after the batch, sorted by address.
    pub records: Vec<RecordSnapshot>,
    /// Program statistics after the batch.
    pub stats: ProgramStats,
}

impl BatchReport {
    /// Number of requests that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.responses.iter().filter(|r| !r.success).count()
    }
}

/// In-memory ledger plus program.
pub struct ArkRuntime {
    program: Arc<RuntimeProgram>,
    handler: ArkHandler<RuntimeProgram>,
}

impl ArkRuntime {
    /// Create a runtime from validated configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        let clock = RuntimeClock::from(&config.clock);
        let program = Arc::new(ArkProgram::new(
            Arc::new(InMemoryAccountStore::new()),
            clock,
            config.program,
        ));
        info!(
            program_id = %program.config().program_id,
            max_governments = program.config().max_governments,
            max_trades = program.config().max_trades,
            max_services = program.config().max_services,
            "Ark runtime created"
        );

        Self {
            handler: ArkHandler::new(Arc::clone(&program)),
            program,
        }
    }

    /// The program being driven.
    pub fn program(&self) -> &Arc<RuntimeProgram> {
        &self.program
    }

    /// Replays `requests` in order. Failed requests do not stop the batch.
    pub async fn run_batch(&self, requests: Vec<ArkRequestPayload>) -> BatchReport {
        info!(requests = requests.len(), "Replaying batch");

        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.handler.handle(request).await);
        }

        let report = BatchReport {
            responses,
            records: self.snapshot(),
            stats: self.program.stats(),
        };
        info!(
            failures = report.failures(),
            records = report.records.len(),
            "Batch complete"
        );
        report
    }

    /// Decodes every account in the ledger.
    pub fn snapshot(&self) -> Vec<RecordSnapshot> {
        self.program
            .store()
            .addresses()
            .into_iter()
            .filter_map(|address| {
                let record = self
                    .program
                    .read_analytics(&address)
                    .map(ProgramAccount::into_record)
                    .or_else(|_| {
                        self.program
                            .read_escrow(&address)
                            .map(ProgramAccount::into_record)
                    })
                    .ok()?;
                Some(RecordSnapshot { address, record })
            })
            .collect()
    }
}
