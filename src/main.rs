//! livemon: a live, scrolling chart of simulated system telemetry.
//!
//! Run with:  `RUST_LOG=info livemon`  (add `--headless` to log samples
//! without opening a window).

use anyhow::Result;
use clap::Parser;
use livemon_core::Metric;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "livemon")]
#[command(about = "Live, scrolling chart of simulated system telemetry")]
#[command(version)]
struct Cli {
    /// Stream samples into the log instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Initial metric: cpu, memory or temperature (overrides the config file)
    #[arg(long)]
    metric: Option<Metric>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("livemon v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.headless {
        return livemon_app::headless::run(cli.metric).map_err(Into::into);
    }

    livemon_app::run(cli.metric).map_err(Into::into)
}
