//! # Check Command Implementation
//!
//! Loads the membership and permission tables and reports every place where
//! they disagree (see `partner_access::consistency`). Exits non-zero when
//! any issue is found.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use partner_access::consistency;
use partner_access::output::{OutputConfig, Status};
use partner_access::store::{TableStore, YamlFileStore};

use super::table_args::TableArgs;

/// Check that the membership and permission tables agree
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub tables: TableArgs,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let settings = args.tables.resolve(None)?;

    println!(
        "Checking {} against {} ({})",
        settings.group_file.display(),
        settings.repo_file.display(),
        settings.repository
    );

    let store = YamlFileStore::new(&settings.group_file, &settings.repo_file);
    let groups = store.load_groups()?;
    let mut permissions = store.load_permissions()?;
    permissions.parse_repository(&settings.repository)?;

    let issues = consistency::check(&groups, &permissions, &settings.repository);
    if issues.is_empty() {
        out.print(
            Status::Ok,
            format!("{} group-access-name(s) consistent", groups.len()),
        );
        return Ok(());
    }

    for issue in &issues {
        out.print(Status::Error, issue.to_string());
    }
    anyhow::bail!("{} consistency issue(s) found", issues.len());
}
