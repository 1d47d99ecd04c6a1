//! # Members Command Implementation
//!
//! Direct edits to a single membership file, for files that are not paired
//! with a repository permission file. No access-level handling and no git.
//!
//! ```bash
//! partner-access members add --file example.yaml example_group1 itamar0000
//! partner-access members remove --file example.yaml example_group1 itamar0000
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use partner_access::membership;
use partner_access::output::{OutputConfig, Status};
use partner_access::sync::RemoveOutcome;

/// Edit a single membership file
#[derive(Args, Debug)]
pub struct MembersArgs {
    #[command(subcommand)]
    pub action: MembersAction,
}

#[derive(Subcommand, Debug)]
pub enum MembersAction {
    /// Append partners under a key
    Add {
        /// Membership file to edit (must exist)
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Key to add partners under
        #[arg(value_name = "KEY", value_parser = clap::builder::NonEmptyStringValueParser::new())]
        key: String,

        /// Partners to add
        #[arg(value_name = "PARTNER", required = true, num_args = 1..)]
        partners: Vec<String>,
    },

    /// Remove a partner from a key
    Remove {
        /// Membership file to edit (must exist)
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// Key to remove the partner from
        #[arg(value_name = "KEY", value_parser = clap::builder::NonEmptyStringValueParser::new())]
        key: String,

        /// Partner to remove
        #[arg(value_name = "PARTNER")]
        partner: String,
    },
}

/// Execute the `members` command.
pub fn execute(args: MembersArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    match args.action {
        MembersAction::Add {
            file,
            key,
            partners,
        } => {
            let added = membership::add_members(&file, &key, &partners)?;
            if added.is_empty() {
                out.print(
                    Status::Info,
                    format!("All partners already listed under {}", key),
                );
            } else {
                out.print(
                    Status::Ok,
                    format!(
                        "Added {} to {} in {}",
                        added.join(", "),
                        key,
                        file.display()
                    ),
                );
            }
        }
        MembersAction::Remove { file, key, partner } => {
            match membership::remove_member(&file, &key, &partner)? {
                RemoveOutcome::Removed { .. } => out.print(
                    Status::Ok,
                    format!("Partner {} removed from {}", partner, key),
                ),
                RemoveOutcome::PartnerNotFound { .. } => out.print(
                    Status::Warn,
                    format!("Partner {} not found in {}", partner, key),
                ),
                RemoveOutcome::GroupNotFound { .. } => {
                    out.print(Status::Warn, format!("Group {} not found", key))
                }
            }
        }
    }

    Ok(())
}
