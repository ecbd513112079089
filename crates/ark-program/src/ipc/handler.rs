//! IPC Handler for the Ark program
//!
//! Never fails: every error is reported inside the response payload.

use crate::domain::value_objects::RecordKind;
use crate::domain::ProgramAccount;
use crate::ipc::payloads::{ArkRequestPayload, ArkResponsePayload, FetchRecordPayload};
use crate::ports::inbound::ArkProgramApi;
use std::sync::Arc;
use tracing::{debug, warn};

/// IPC Handler for the Ark program.
///
/// Delegates to any [`ArkProgramApi`] implementation.
pub struct ArkHandler<A: ArkProgramApi> {
    api: Arc<A>,
}

impl<A: ArkProgramApi> ArkHandler<A> {
    /// Create a new handler.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Handle an instruction request.
    pub async fn handle(&self, payload: ArkRequestPayload) -> ArkResponsePayload {
        let correlation_id = payload.correlation_id;
        debug!(%correlation_id, instruction = %payload.instruction, "Handling request");

        match self.api.process(payload.into()).await {
            Ok(response) => ArkResponsePayload::ok(correlation_id, response.record, response.events),
            Err(err) => {
                warn!(%correlation_id, error = %err, "Request rejected");
                ArkResponsePayload::err(correlation_id, &err)
            }
        }
    }

    /// Handle a record read.
    pub async fn handle_fetch(&self, payload: FetchRecordPayload) -> ArkResponsePayload {
        let correlation_id = payload.correlation_id;
        let result = match payload.kind {
            RecordKind::Analytics => self
                .api
                .fetch_analytics(payload.address)
                .await
                .map(ProgramAccount::into_record),
            RecordKind::Escrow => self
                .api
                .fetch_escrow(payload.address)
                .await
                .map(ProgramAccount::into_record),
        };

        match result {
            Ok(record) => ArkResponsePayload::ok(correlation_id, record, Vec::new()),
            Err(err) => {
                debug!(%correlation_id, error = %err, "Fetch failed");
                ArkResponsePayload::err(correlation_id, &err)
            }
        }
    }
}
