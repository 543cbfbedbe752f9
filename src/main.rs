use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use tubedeck::app::AppPlatform;
use tubedeck::config::{Config, LoggingConfig};

/// RUST_LOG wins over `fallback`.
fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Subscriber used while the config (and with it the real filter) is loading.
fn startup_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&LoggingConfig::default().filter))
        .with_writer(writer)
        .finish()
}

fn main() -> Result<()> {
    let config =
        tracing::subscriber::with_default(startup_subscriber(std::io::stderr), Config::load)?;

    // Logs go to stderr so they don't interleave with the terminal UI.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Tubedeck {}", env!("CARGO_PKG_VERSION"));

    let runtime = Arc::new(tokio::runtime::Runtime::new()?);
    AppPlatform::run_terminal(runtime, &config)?;

    Ok(())
}
