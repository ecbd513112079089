//! # Integration Tests
//!
//! Drive the program only through its public API, the way a client would.

pub mod concurrency;
pub mod properties;
pub mod the_ark_program;
