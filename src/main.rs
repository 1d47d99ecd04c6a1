//! # Partner Access CLI
//!
//! Binary entry point for the `partner-access` command-line tool.
//!
//! Parses arguments with `clap` and dispatches to the subcommand. All table
//! logic lives in the library crate; fatal errors propagate out of `main`
//! and are printed by `anyhow`.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
