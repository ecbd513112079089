//! # Ark Runtime
//!
//! Replays a JSON array of request payloads and prints the resulting report.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ark_program::ipc::ArkRequestPayload;
use ark_runtime::{ArkRuntime, RuntimeConfig};
use ark_telemetry::{init_logging, TelemetryConfig};

/// Ark Runtime: replay request batches against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "ark-runtime")]
#[command(version)]
#[command(about = "Replays Ark program requests and prints the resulting records")]
struct Args {
    /// JSON file holding an array of request payloads
    #[arg(short, long)]
    requests: PathBuf,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter, overrides ARK_LOG_LEVEL / RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Exit with status 1 if any request failed
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    init_logging(&telemetry).context("failed to initialize logging")?;

    // Load configuration
    let config = match &args.config {
        Some(path) => RuntimeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RuntimeConfig::default(),
    };

    // Load requests
    let content = fs::read_to_string(&args.requests)
        .with_context(|| format!("failed to read {}", args.requests.display()))?;
    let requests: Vec<ArkRequestPayload> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", args.requests.display()))?;

    // Replay
    let runtime = ArkRuntime::new(config);
    let report = runtime.run_batch(requests).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to encode report")?;
    println!("{output}");

    let failures = report.failures();
    info!(failures, "Replay finished");
    if args.strict && failures > 0 {
        anyhow::bail!("{failures} request(s) failed");
    }

    Ok(())
}
