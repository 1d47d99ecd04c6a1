//! # Completions Command Implementation
//!
//! Prints a `clap_complete` script covering every `partner-access`
//! subcommand and flag, or writes it straight to a file with `--output`.
//!
//! ```bash
//! partner-access completions bash > ~/.local/share/bash-completion/completions/partner-access
//! partner-access completions zsh --output ~/.zfunc/_partner-access
//! ```

use anyhow::{Context, Result};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use log::info;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match args.output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            generate(args.shell, &mut cmd, name, &mut file);
            info!("wrote {} completions to {}", args.shell, path.display());
        }
        None => generate(args.shell, &mut cmd, name, &mut io::stdout()),
    }
    Ok(())
}
