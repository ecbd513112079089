//! Ports module for the Ark program
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ArkInstruction, ArkProgramApi, ArkRequest, ArkResponse};
pub use outbound::{AccountStore, Clock};
