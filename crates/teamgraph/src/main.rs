//! Teamgraph CLI binary.

use anyhow::Result;
use teamgraph::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the teamgraph CLI.
///
/// Runs on tokio's current_thread runtime: the only I/O is reading and
/// writing the people file, one command at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=teamgraph=debug,teamgraph_jsonl=trace
    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("teamgraph=info,teamgraph_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting teamgraph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Teamgraph CLI completed successfully");
    Ok(())
}
