//! # Property Tests
//!
//! Random operation sequences against one analytics and one escrow record.
//! After every step the record invariants must hold, counters must not
//! decrease, lists must only grow at the tail, and a failed step must leave
//! both records exactly as they were.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ark_program::prelude::*;
    use proptest::prelude::*;

    const CAPACITY: u32 = 3;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new([byte; 32])
    }

    fn authority() -> Pubkey {
        key(0xAA)
    }

    fn analytics_address() -> Pubkey {
        key(0xA0)
    }

    fn escrow_address() -> Pubkey {
        key(0xE0)
    }

    #[derive(Debug, Clone)]
    enum Op {
        Government(u8),
        Trade(u8),
        Service(u8),
        Poll(bool),
        ReinitializeAnalytics,
        ReinitializeEscrow,
    }

    impl Op {
        fn request(&self) -> ArkRequest {
            let (target, instruction) = match *self {
                Op::Government(id) => (
                    analytics_address(),
                    ArkInstruction::RegisterGovernment {
                        government: key(id + 1),
                    },
                ),
                Op::Trade(id) => (
                    escrow_address(),
                    ArkInstruction::RegisterTrade { trade: key(id + 1) },
                ),
                Op::Service(id) => (
                    escrow_address(),
                    ArkInstruction::RegisterService {
                        service: key(id + 1),
                    },
                ),
                Op::Poll(approved) => (
                    analytics_address(),
                    ArkInstruction::UpdateAnalytics { approved },
                ),
                Op::ReinitializeAnalytics => (
                    analytics_address(),
                    ArkInstruction::InitializeAnalytics {
                        authority: authority(),
                    },
                ),
                Op::ReinitializeEscrow => (
                    escrow_address(),
                    ArkInstruction::InitializeEscrow {
                        authority: authority(),
                    },
                ),
            };
            ArkRequest::new(authority(), target, instruction)
        }
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..5).prop_map(Op::Government),
            3 => (0u8..5).prop_map(Op::Trade),
            3 => (0u8..5).prop_map(Op::Service),
            3 => any::<bool>().prop_map(Op::Poll),
            1 => Just(Op::ReinitializeAnalytics),
            1 => Just(Op::ReinitializeEscrow),
        ]
    }

    fn program() -> ArkProgram<InMemoryAccountStore, FixedClock> {
        let config = ArkConfig {
            max_governments: CAPACITY,
            max_trades: CAPACITY,
            max_services: CAPACITY,
            ..ArkConfig::default()
        };
        let program = ArkProgram::new(
            Arc::new(InMemoryAccountStore::new()),
            FixedClock::new(0),
            config,
        );
        program
            .dispatch(ArkRequest::new(
                authority(),
                analytics_address(),
                ArkInstruction::InitializeAnalytics {
                    authority: authority(),
                },
            ))
            .unwrap();
        program
            .dispatch(ArkRequest::new(
                authority(),
                escrow_address(),
                ArkInstruction::InitializeEscrow {
                    authority: authority(),
                },
            ))
            .unwrap();
        program
    }

    /// Plain reference model of the two records.
    #[derive(Debug, Default)]
    struct Model {
        governments: Vec<Pubkey>,
        trades: Vec<Pubkey>,
        services: Vec<Pubkey>,
        approved: u64,
        rejected: u64,
    }

    impl Model {
        fn apply(&mut self, op: &Op) -> bool {
            let capacity = CAPACITY as usize;
            match *op {
                Op::Government(id) => {
                    let government = key(id + 1);
                    if self.governments.len() == capacity || self.governments.contains(&government)
                    {
                        return false;
                    }
                    self.governments.push(government);
                }
                Op::Trade(id) => {
                    if self.trades.len() == capacity {
                        return false;
                    }
                    self.trades.push(key(id + 1));
                }
                Op::Service(id) => {
                    if self.services.len() == capacity {
                        return false;
                    }
                    self.services.push(key(id + 1));
                }
                Op::Poll(true) => self.approved += 1,
                Op::Poll(false) => self.rejected += 1,
                Op::ReinitializeAnalytics | Op::ReinitializeEscrow => return false,
            }
            true
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: invariants hold after every step, and failures change nothing.
        #[test]
        fn prop_invariants_hold_after_every_step(ops in prop::collection::vec(arb_op(), 0..40)) {
            let program = program();
            let mut analytics = program.read_analytics(&analytics_address()).unwrap();
            let mut escrow = program.read_escrow(&escrow_address()).unwrap();

            for op in &ops {
                let result = program.dispatch(op.request());
                let next_analytics = program.read_analytics(&analytics_address()).unwrap();
                let next_escrow = program.read_escrow(&escrow_address()).unwrap();

                // Counter equals list length
                prop_assert_eq!(next_analytics.government_count, next_analytics.governments.len() as u64);
                prop_assert_eq!(next_escrow.total_trades, next_escrow.trades.len() as u64);
                prop_assert_eq!(next_escrow.total_services, next_escrow.services.len() as u64);

                // Poll tally
                prop_assert_eq!(
                    next_analytics.poll_count,
                    next_analytics.approved_count + next_analytics.rejected_count
                );

                // Capacity
                prop_assert!(next_analytics.governments.len() <= CAPACITY as usize);
                prop_assert!(next_escrow.trades.len() <= CAPACITY as usize);
                prop_assert!(next_escrow.services.len() <= CAPACITY as usize);

                // Monotonic counters, append-only lists
                prop_assert!(next_analytics.points >= analytics.points);
                prop_assert!(next_analytics.poll_count >= analytics.poll_count);
                prop_assert!(analytics.governments.is_prefix_of(&next_analytics.governments));
                prop_assert!(escrow.trades.is_prefix_of(&next_escrow.trades));
                prop_assert!(escrow.services.is_prefix_of(&next_escrow.services));

                if result.is_err() {
                    prop_assert_eq!(&next_analytics, &analytics);
                    prop_assert_eq!(&next_escrow, &escrow);
                }

                analytics = next_analytics;
                escrow = next_escrow;
            }
        }

        /// Property: the program agrees with a plain reference model.
        #[test]
        fn prop_matches_reference_model(ops in prop::collection::vec(arb_op(), 0..40)) {
            let program = program();
            let mut model = Model::default();

            for op in &ops {
                let expected_ok = model.apply(op);
                let result = program.dispatch(op.request());
                prop_assert_eq!(result.is_ok(), expected_ok, "op {:?} gave {:?}", op, result);
            }

            let analytics = program.read_analytics(&analytics_address()).unwrap();
            let escrow = program.read_escrow(&escrow_address()).unwrap();
            prop_assert_eq!(analytics.governments.as_slice(), model.governments.as_slice());
            prop_assert_eq!(escrow.trades.as_slice(), model.trades.as_slice());
            prop_assert_eq!(escrow.services.as_slice(), model.services.as_slice());
            prop_assert_eq!(analytics.approved_count, model.approved);
            prop_assert_eq!(analytics.rejected_count, model.rejected);
            prop_assert_eq!(analytics.points, model.approved + model.rejected);
        }

        /// Property: a full list rejects with CapacityExceeded.
        #[test]
        fn prop_full_list_rejects(extra in 1usize..5) {
            let program = program();
            for i in 0..CAPACITY as u8 {
                program.dispatch(Op::Trade(i).request()).unwrap();
            }
            for i in 0..extra {
                let err = program.dispatch(Op::Trade(i as u8).request()).unwrap_err();
                prop_assert_eq!(err, ArkError::CapacityExceeded { list: ListKind::Trades, capacity: CAPACITY });
            }
        }
    }
}
