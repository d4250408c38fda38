//! portscout - concurrent TCP connect port scanner.
//!
//! Usage:
//!   portscout <HOST> <START_PORT> <END_PORT> [--report <PATH>]

use anyhow::Context;
use clap::Parser;
use portscout::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise logging (RUST_LOG=debug etc.)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Missing arguments print usage and exit with status 2.
    let cli = Cli::parse();
    let host = cli.host.clone();

    cli::run(cli)
        .await
        .with_context(|| format!("scan of {} failed", host))?;

    Ok(())
}
