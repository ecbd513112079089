//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{AnalyticsRecord, ArkRecord, EscrowRecord};
use crate::domain::value_objects::Pubkey;
use crate::errors::ArkError;
use crate::events::ArkEvent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six program operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ArkInstruction {
    /// Create an analytics record at the target, owned by `authority`.
    InitializeAnalytics {
        /// Designated creator; must be the signer.
        authority: Pubkey,
    },
    /// Create an escrow record at the target, owned by `authority`.
    InitializeEscrow {
        /// Designated creator; must be the signer.
        authority: Pubkey,
    },
    /// Append a government; the signer pays.
    RegisterGovernment {
        /// Identity to register.
        government: Pubkey,
    },
    /// Append a trade.
    RegisterTrade {
        /// Identity to register.
        trade: Pubkey,
    },
    /// Append a service.
    RegisterService {
        /// Identity to register.
        service: Pubkey,
    },
    /// Record one poll outcome.
    UpdateAnalytics {
        /// Outcome.
        approved: bool,
    },
}

impl ArkInstruction {
    /// Instruction name, used as a log field.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeAnalytics { .. } => "initialize_analytics",
            Self::InitializeEscrow { .. } => "initialize_escrow",
            Self::RegisterGovernment { .. } => "register_government",
            Self::RegisterTrade { .. } => "register_trade",
            Self::RegisterService { .. } => "register_service",
            Self::UpdateAnalytics { .. } => "update_analytics",
        }
    }
}

impl fmt::Display for ArkInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instruction addressed to one record, signed by one identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArkRequest {
    /// Signing authority.
    pub signer: Pubkey,
    /// Record address.
    pub target: Pubkey,
    /// What to do.
    pub instruction: ArkInstruction,
}

impl ArkRequest {
    /// Builds a request.
    #[must_use]
    pub fn new(signer: Pubkey, target: Pubkey, instruction: ArkInstruction) -> Self {
        Self {
            signer,
            target,
            instruction,
        }
    }
}

/// Outcome of a successful operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArkResponse {
    /// Record state after the operation.
    pub record: ArkRecord,
    /// Events emitted by the operation.
    pub events: Vec<ArkEvent>,
}

/// Primary Ark program API
#[async_trait]
pub trait ArkProgramApi: Send + Sync {
    /// Authorize, apply and commit one request.
    ///
    /// Either every effect of the request is committed or none is.
    async fn process(&self, request: ArkRequest) -> Result<ArkResponse, ArkError>;

    /// Current analytics record at `address`.
    async fn fetch_analytics(&self, address: Pubkey) -> Result<AnalyticsRecord, ArkError>;

    /// Current escrow record at `address`.
    async fn fetch_escrow(&self, address: Pubkey) -> Result<EscrowRecord, ArkError>;

    /// Owner written into every account this program creates.
    fn program_id(&self) -> Pubkey;
}
