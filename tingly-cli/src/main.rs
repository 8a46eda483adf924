//! Tingly Console
//!
//! Command-line administrative console for the Tingly Box AI proxy.

mod cli;
mod commands;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr, so command output stays pipeable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tingly_core=info".parse().unwrap())
                .add_directive("tingly_cli=info".parse().unwrap()),
        )
        .init();

    tracing::debug!("Starting Tingly Console v{}", tingly_core::VERSION);

    let args = cli::Cli::parse();

    // Create tokio runtime for the async API client
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(commands::run(args))
}
