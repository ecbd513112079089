//! # Concurrency Tests
//!
//! Many callers against one shared program. Every registration either lands
//! completely or fails completely, and the counters end up matching the
//! number of successful calls.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ark_program::prelude::*;

    async fn initialized(program: &Arc<ArkProgram<InMemoryAccountStore, FixedClock>>) -> (Pubkey, Pubkey, Pubkey) {
        let wallet = Pubkey::new_unique();
        let analytics = Pubkey::new_unique();
        let escrow = Pubkey::new_unique();
        program
            .process(ArkRequest::new(
                wallet,
                analytics,
                ArkInstruction::InitializeAnalytics { authority: wallet },
            ))
            .await
            .unwrap();
        program
            .process(ArkRequest::new(
                wallet,
                escrow,
                ArkInstruction::InitializeEscrow { authority: wallet },
            ))
            .await
            .unwrap();
        (wallet, analytics, escrow)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_trades_never_exceed_capacity() {
        let program = Arc::new(create_test_program());
        let (wallet, _, escrow) = initialized(&program).await;

        let mut handles = Vec::new();
        for _ in 0..32 {
            let program = Arc::clone(&program);
            handles.push(tokio::spawn(async move {
                program
                    .process(ArkRequest::new(
                        wallet,
                        escrow,
                        ArkInstruction::RegisterTrade {
                            trade: Pubkey::new_unique(),
                        },
                    ))
                    .await
            }));
        }

        let mut succeeded = 0u64;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert!(matches!(err, ArkError::CapacityExceeded { .. })),
            }
        }

        let record = program.fetch_escrow(escrow).await.unwrap();
        let capacity = u64::from(program.config().max_trades);
        assert_eq!(succeeded, capacity);
        assert_eq!(record.total_trades, capacity);
        assert_eq!(record.trades.len() as u64, capacity);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_polls_are_all_counted() {
        let program = Arc::new(create_test_program());
        let (wallet, analytics, _) = initialized(&program).await;

        let mut handles = Vec::new();
        for i in 0..100 {
            let program = Arc::clone(&program);
            handles.push(tokio::spawn(async move {
                program
                    .process(ArkRequest::new(
                        wallet,
                        analytics,
                        ArkInstruction::UpdateAnalytics { approved: i % 3 != 0 },
                    ))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let record = program.fetch_analytics(analytics).await.unwrap();
        assert_eq!(record.poll_count, 100);
        assert_eq!(record.rejected_count, 34);
        assert_eq!(record.approved_count, 66);
        assert_eq!(record.points, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_government_registers_once() {
        let program = Arc::new(create_test_program());
        let (wallet, analytics, _) = initialized(&program).await;
        let government = Pubkey::new_unique();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let program = Arc::clone(&program);
            handles.push(tokio::spawn(async move {
                program
                    .process(ArkRequest::new(
                        wallet,
                        analytics,
                        ArkInstruction::RegisterGovernment { government },
                    ))
                    .await
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 1);
        let record = program.fetch_analytics(analytics).await.unwrap();
        assert_eq!(record.government_count, 1);
        assert_eq!(program.stats().requests_failed, 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_initialization_succeeds_once() {
        let program = Arc::new(create_test_program());
        let wallet = Pubkey::new_unique();
        let escrow = Pubkey::new_unique();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let program = Arc::clone(&program);
            handles.push(tokio::spawn(async move {
                program
                    .process(ArkRequest::new(
                        wallet,
                        escrow,
                        ArkInstruction::InitializeEscrow { authority: wallet },
                    ))
                    .await
            }));
        }

        let results: Vec<_> = join_results(handles).await;
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == ArkError::AlreadyInitialized { address: escrow }));
    }

    async fn join_results(
        handles: Vec<tokio::task::JoinHandle<Result<ArkResponse, ArkError>>>,
    ) -> Vec<Result<ArkResponse, ArkError>> {
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }
}
