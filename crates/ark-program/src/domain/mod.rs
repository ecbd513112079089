//! Domain module for the Ark program
//!
//! Contains records, value objects, bounded lists, invariants and the
//! account codec.

pub mod bounded;
pub mod codec;
pub mod counters;
pub mod entities;
pub mod invariants;
pub mod value_objects;

pub use bounded::{BoundedList, ListFull};
pub use codec::ProgramAccount;
pub use entities::*;
pub use value_objects::*;
