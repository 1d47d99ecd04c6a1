//! # Remove Command Implementation
//!
//! Revokes a partner's access level in a group. When the partner was the
//! last one at that level, the group-access-name is dropped from both the
//! membership file and the repository's permission entries.

use anyhow::Result;
use clap::Args;

use partner_access::access::AccessType;
use partner_access::output::{OutputConfig, Status};
use partner_access::store::YamlFileStore;
use partner_access::sync::{AccessSynchronizer, RemoveOutcome};

use super::table_args::{parse_access_type, PushArgs, TableArgs};

/// Revoke a partner's access level in a group
#[derive(Args, Debug)]
pub struct RemoveArgs {
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

/// Execute the `remove` command.
///
/// A missing group or partner is reported and ends the command successfully
/// without writing or publishing anything.
pub fn execute(args: RemoveArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let settings = args.tables.resolve(args.push.message.clone())?;

    let store = YamlFileStore::new(&settings.group_file, &settings.repo_file);
    let mut sync = AccessSynchronizer::new(store, settings.repository.clone());

    match sync.remove_partner(&args.group, &args.partner, args.access)? {
        RemoveOutcome::Removed {
            partner,
            group_access_name,
            emptied,
        } => {
            out.print(
                Status::Ok,
                format!("Partner {} removed from {}", partner, group_access_name),
            );
            if emptied {
                out.print(
                    Status::Info,
                    format!(
                        "{} is now empty and was removed from {}",
                        group_access_name, settings.repository
                    ),
                );
            }
            let message = format!("Remove {} from {}", partner, group_access_name);
            args.push.publish(&settings, &message, &out);
        }
        RemoveOutcome::PartnerNotFound {
            partner,
            group_access_name,
        } => {
            out.print(
                Status::Warn,
                format!("Partner {} not found in {}", partner, group_access_name),
            );
        }
        RemoveOutcome::GroupNotFound { group_access_name } => {
            out.print(
                Status::Warn,
                format!("Group {} not found", group_access_name),
            );
        }
    }

    Ok(())
}
