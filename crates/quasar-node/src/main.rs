//! # Quasar Node
//!
//! Replays a JSON-lines command script against a fresh currency registry.
//!
//! ## Startup Sequence
//!
//! 1. Parse flags (falling back to `QUASAR_*` environment variables)
//! 2. Initialize telemetry (logs go to stderr)
//! 3. Create the event bus, history indexer and registry
//! 4. Run the script, one JSON outcome per command on stdout
//! 5. Log the indexer summary
//!
//! Ctrl+C aborts the run with exit status 130.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use quasar_node::{CliArgs, NodeConfig, NodeRuntime, RunSummary, ScriptSource};
use quasar_telemetry::init_telemetry;

fn run(config: NodeConfig) -> Result<(NodeRuntime, RunSummary)> {
    let mut runtime = NodeRuntime::new(config.registry).context("Failed to create runtime")?;
    let stdout = io::stdout().lock();

    let summary = match &config.script {
        ScriptSource::Stdin => runtime.run_script(io::stdin().lock(), stdout),
        ScriptSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            runtime.run_script(BufReader::new(file), stdout)
        }
    }
    .context("Script run failed")?;

    Ok((runtime, summary))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = NodeConfig::from_args(args).context("Invalid configuration")?;

    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Quasar Node v{}", env!("CARGO_PKG_VERSION"));
    info!("  Administrator: {}", config.registry.administrator);
    info!("===========================================");

    let worker = tokio::task::spawn_blocking(move || run(config));

    tokio::select! {
        joined = worker => {
            let (runtime, summary) = joined.context("Script worker panicked")??;
            runtime.log_indexer_summary();
            info!(rejected = summary.rejected, invalid = summary.invalid, "Shutdown complete");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping before the script finished");
            std::process::exit(130);
        }
    }

    Ok(())
}
