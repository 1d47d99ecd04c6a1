//! # Add Command Implementation
//!
//! Grants a partner an access level in a group.
//!
//! ## Functionality
//!
//! - Adds the partner under `{group}_{access}` in the membership file
//! - Moves the partner out of the group's other access levels
//! - Sets the group's permission entry on the configured repository
//! - Commits and pushes the change (unless `--no-push`)

use anyhow::Result;
use clap::Args;

use partner_access::access::AccessType;
use partner_access::output::{OutputConfig, Status};
use partner_access::store::YamlFileStore;
use partner_access::sync::AccessSynchronizer;

use super::table_args::{parse_access_type, PushArgs, TableArgs};

/// Grant a partner access to a group
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Group name (without the access suffix)
    #[arg(value_name = "GROUP", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub group: String,

    /// Partner identifier
    #[arg(value_name = "PARTNER", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub partner: String,

    /// Access level: read, triage or write
    #[arg(value_name = "ACCESS", value_parser = parse_access_type)]
    pub access: AccessType,

    #[command(flatten)]
    pub tables: TableArgs,

    #[command(flatten)]
    pub push: PushArgs,
}

/// Execute the `add` command.
pub fn execute(args: AddArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let settings = args.tables.resolve(args.push.message.clone())?;

    let store = YamlFileStore::new(&settings.group_file, &settings.repo_file);
    let mut sync = AccessSynchronizer::new(store, settings.repository.clone());
    let outcome = sync.add_partner(&args.group, &args.partner, args.access)?;

    for previous in &outcome.moved_from {
        out.print(
            Status::Info,
            format!("Partner {} removed from {}", outcome.partner, previous),
        );
    }

    if !outcome.changed {
        out.print(
            Status::Info,
            format!(
                "Partner {} already in {}, nothing to publish",
                outcome.partner, outcome.group_access_name
            ),
        );
        return Ok(());
    }

    out.print(
        Status::Ok,
        format!(
            "Partner {} added to {}",
            outcome.partner, outcome.group_access_name
        ),
    );

    let message = format!("Add {} to {}", outcome.partner, outcome.group_access_name);
    args.push.publish(&settings, &message, &out);
    Ok(())
}
