//! # End-to-End Scenario
//!
//! One wallet initializes both records, then registers a trade, a service and
//! a government and records one approved poll. Every step is checked through
//! a fresh fetch, the way a client reads account state back.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ark_program::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Scenario {
        program: ArkProgram<InMemoryAccountStore, FixedClock>,
        wallet: Pubkey,
        analytics: Pubkey,
        escrow: Pubkey,
    }

    impl Scenario {
        async fn initialized() -> Self {
            let scenario = Self {
                program: create_test_program(),
                wallet: Pubkey::new_unique(),
                analytics: Pubkey::new_unique(),
                escrow: Pubkey::new_unique(),
            };
            scenario
                .send(
                    scenario.analytics,
                    ArkInstruction::InitializeAnalytics {
                        authority: scenario.wallet,
                    },
                )
                .await
                .unwrap();
            scenario
                .send(
                    scenario.escrow,
                    ArkInstruction::InitializeEscrow {
                        authority: scenario.wallet,
                    },
                )
                .await
                .unwrap();
            scenario
        }

        async fn send(
            &self,
            target: Pubkey,
            instruction: ArkInstruction,
        ) -> Result<ArkResponse, ArkError> {
            self.program
                .process(ArkRequest::new(self.wallet, target, instruction))
                .await
        }
    }

    // =============================================================================
    // SCENARIO
    // =============================================================================

    #[tokio::test]
    async fn test_initialize_the_ark() {
        let s = Scenario::initialized().await;
        let analytics = s.program.fetch_analytics(s.analytics).await.unwrap();

        assert_eq!(analytics.government_count, 0);
        assert_eq!(analytics.poll_count, 0);
        assert_eq!(analytics.approved_count, 0);
        assert_eq!(analytics.rejected_count, 0);
        assert_eq!(analytics.points, 0);
        assert_eq!(analytics.authority, s.wallet);
    }

    #[tokio::test]
    async fn test_initialize_the_escrow() {
        let s = Scenario::initialized().await;
        let escrow = s.program.fetch_escrow(s.escrow).await.unwrap();

        assert_eq!(escrow.total_trades, 0);
        assert_eq!(escrow.total_services, 0);
        assert_eq!(escrow.total_fees_collected, 0);
        assert_eq!(escrow.total_amount_transferred, 0);
    }

    #[tokio::test]
    async fn test_full_client_flow() {
        let s = Scenario::initialized().await;

        // Register a trade
        let trade = Pubkey::new_unique();
        s.send(s.escrow, ArkInstruction::RegisterTrade { trade })
            .await
            .unwrap();
        let escrow = s.program.fetch_escrow(s.escrow).await.unwrap();
        assert_eq!(escrow.total_trades, 1);
        assert_eq!(escrow.trades[0], trade);

        // Register a service
        let service = Pubkey::new_unique();
        s.send(s.escrow, ArkInstruction::RegisterService { service })
            .await
            .unwrap();
        let escrow = s.program.fetch_escrow(s.escrow).await.unwrap();
        assert_eq!(escrow.total_services, 1);
        assert_eq!(escrow.services[0], service);

        // Register a government
        let government = Pubkey::new_unique();
        let response = s
            .send(s.analytics, ArkInstruction::RegisterGovernment { government })
            .await
            .unwrap();
        let analytics = s.program.fetch_analytics(s.analytics).await.unwrap();
        assert_eq!(analytics.government_count, 1);
        assert_eq!(analytics.governments[0], government);
        assert!(matches!(
            response.events[0],
            ArkEvent::GovernmentRegistered { payer, program_id, .. }
                if payer == s.wallet && program_id == s.program.program_id()
        ));

        // Update analytics
        s.send(s.analytics, ArkInstruction::UpdateAnalytics { approved: true })
            .await
            .unwrap();
        let analytics = s.program.fetch_analytics(s.analytics).await.unwrap();
        assert_eq!(analytics.approved_count, 1);
        assert_eq!(analytics.poll_count, 1);
        assert_eq!(analytics.rejected_count, 0);
    }

    #[tokio::test]
    async fn test_reinitialize_keeps_state() {
        let s = Scenario::initialized().await;
        s.send(
            s.escrow,
            ArkInstruction::RegisterTrade {
                trade: Pubkey::new_unique(),
            },
        )
        .await
        .unwrap();

        let err = s
            .send(s.escrow, ArkInstruction::InitializeEscrow { authority: s.wallet })
            .await
            .unwrap_err();
        assert_eq!(err, ArkError::AlreadyInitialized { address: s.escrow });
        assert_eq!(s.program.fetch_escrow(s.escrow).await.unwrap().total_trades, 1);
    }

    #[tokio::test]
    async fn test_governments_fill_up() {
        let s = Scenario::initialized().await;
        let capacity = s.program.config().max_governments;
        for _ in 0..capacity {
            s.send(
                s.analytics,
                ArkInstruction::RegisterGovernment {
                    government: Pubkey::new_unique(),
                },
            )
            .await
            .unwrap();
        }

        let err = s
            .send(
                s.analytics,
                ArkInstruction::RegisterGovernment {
                    government: Pubkey::new_unique(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ArkError::CapacityExceeded {
                list: ListKind::Governments,
                capacity
            }
        );
        let analytics = s.program.fetch_analytics(s.analytics).await.unwrap();
        assert_eq!(analytics.government_count, u64::from(capacity));
    }

    #[tokio::test]
    async fn test_scenario_over_ipc() {
        let handler = ArkHandler::new(Arc::new(create_test_program()));
        let wallet = Pubkey::new_unique();
        let escrow = Pubkey::new_unique();

        let init = handler
            .handle(ArkRequestPayload::new(
                wallet,
                escrow,
                ArkInstruction::InitializeEscrow { authority: wallet },
            ))
            .await;
        assert!(init.success);

        let request: ArkRequestPayload = serde_json::from_value(serde_json::json!({
            "correlation_id": uuid::Uuid::nil(),
            "signer": wallet,
            "target": escrow,
            "instruction": { "op": "register_trade", "trade": Pubkey::new_unique() },
        }))
        .unwrap();
        let response = handler.handle(request).await;

        assert!(response.success);
        assert!(response.correlation_id.is_nil());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["record"]["kind"], "escrow");
        assert_eq!(json["record"]["total_trades"], 1);
        assert_eq!(json["events"][0]["event"], "trade_registered");
    }
}
