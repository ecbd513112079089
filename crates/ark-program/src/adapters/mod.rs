//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound port traits.

mod account_store;
mod clock;

pub use account_store::InMemoryAccountStore;
pub use clock::{FixedClock, SystemClock};
