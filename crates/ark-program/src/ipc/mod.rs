//! IPC Module for the Ark program
//!
//! Serde payloads carrying program requests in and results out, and the
//! handler translating between them and [`ArkProgramApi`](crate::ports::ArkProgramApi).

pub mod handler;
pub mod payloads;

pub use handler::ArkHandler;
pub use payloads::*;
