//! # Ark Telemetry
//!
//! Structured logging for the Ark binaries, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ark_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ARK_SERVICE_NAME` | `the-ark` | Service name in log lines |
//! | `ARK_LOG_LEVEL` or `RUST_LOG` | `info` | Log level filter |
//! | `ARK_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `ARK_CONSOLE_OUTPUT` | `true` | Emit logs at all |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}
