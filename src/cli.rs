//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// Partner Access - Keep partner group membership and repository permissions in sync
#[derive(Parser, Debug)]
#[command(name = "partner-access")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        env = "PARTNER_ACCESS_LOG"
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Grant a partner access to a group, moving them out of other access levels
    Add(commands::add::AddArgs),

    /// Revoke a partner's access level in a group
    Remove(commands::remove::RemoveArgs),

    /// Edit a single membership file without touching repository permissions
    Members(commands::members::MembersArgs),

    /// Check that the membership and permission tables agree
    Check(commands::check::CheckArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level: LevelFilter = self
            .log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.log_level))?;
        init_logging(level);

        match self.command {
            Commands::Add(args) => commands::add::execute(args, &self.color),
            Commands::Remove(args) => commands::remove::execute(args, &self.color),
            Commands::Members(args) => commands::members::execute(args, &self.color),
            Commands::Check(args) => commands::check::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` output to stderr. `RUST_LOG`, when set, takes precedence over
/// `--log-level`.
fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}
