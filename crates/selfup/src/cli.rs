//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// selfup - a command-line binary that updates itself from GitHub releases
#[derive(Parser, Debug)]
#[command(name = "selfup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Show the resolved runtime configuration
    Config(ConfigArgs),

    /// Update this binary to the latest release
    Update(UpdateArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the path of the user configuration file instead
    #[arg(long)]
    pub path: bool,
}

// Update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Only check whether an update is available
    #[arg(long)]
    pub check: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}
