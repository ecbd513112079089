//! IPC Payloads for the Ark program

use crate::domain::entities::ArkRecord;
use crate::domain::value_objects::{Pubkey, RecordKind};
use crate::errors::ArkError;
use crate::events::ArkEvent;
use crate::ports::inbound::{ArkInstruction, ArkRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Request to execute one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArkRequestPayload {
    /// Correlation ID for response tracking
    #[serde(default = "Uuid::new_v4")]
    pub correlation_id: Uuid,
    /// Signing authority
    pub signer: Pubkey,
    /// Record address
    pub target: Pubkey,
    /// Instruction to execute
    pub instruction: ArkInstruction,
}

impl ArkRequestPayload {
    /// Wraps a request with a fresh correlation id.
    #[must_use]
    pub fn new(signer: Pubkey, target: Pubkey, instruction: ArkInstruction) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            signer,
            target,
            instruction,
        }
    }
}

impl From<ArkRequestPayload> for ArkRequest {
    fn from(payload: ArkRequestPayload) -> Self {
        ArkRequest::new(payload.signer, payload.target, payload.instruction)
    }
}

/// Request to read a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRecordPayload {
    /// Correlation ID for response tracking
    #[serde(default = "Uuid::new_v4")]
    pub correlation_id: Uuid,
    /// Record address
    pub address: Pubkey,
    /// Expected record type
    pub kind: RecordKind,
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Error details carried in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Stable error name, e.g. `CapacityExceeded`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ArkError> for ErrorPayload {
    fn from(err: &ArkError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Response to a request or fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArkResponsePayload {
    /// Correlation ID from request
    pub correlation_id: Uuid,
    /// Whether the request succeeded
    pub success: bool,
    /// Record state (if succeeded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<ArkRecord>,
    /// Emitted events (empty on failure and for fetches)
    #[serde(default)]
    pub events: Vec<ArkEvent>,
    /// Error (if failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ArkResponsePayload {
    /// A successful response.
    #[must_use]
    pub fn ok(correlation_id: Uuid, record: ArkRecord, events: Vec<ArkEvent>) -> Self {
        Self {
            correlation_id,
            success: true,
            record: Some(record),
            events,
            error: None,
        }
    }

    /// A failed response.
    #[must_use]
    pub fn err(correlation_id: Uuid, error: &ArkError) -> Self {
        Self {
            correlation_id,
            success: false,
            record: None,
            events: Vec::new(),
            error: Some(error.into()),
        }
    }
}
