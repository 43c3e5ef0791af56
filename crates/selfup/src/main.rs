//! selfup CLI - a binary that keeps itself up to date
//!
//! This is the main entry point for the selfup command-line interface.

mod cli;
mod commands;
mod lock;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Update(args) => commands::update::run(args, cli.quiet).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(filter_directive(verbose, quiet)))
        .init();
}

/// Filter for the given flags
///
/// Update stages are already printed as `[n/6]` steps, so the pipeline's own
/// stage logs only show from `-v` up.
fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info,selfup_update=warn",
        1 => "debug",
        _ => "trace",
    }
}
