//! Flags shared by commands that operate on the membership/permission pair.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use partner_access::access::AccessType;
use partner_access::config::{ConfigFile, Settings};
use partner_access::output::{OutputConfig, Status};
use partner_access::publish::{PublishStatus, Publisher};

/// Locations of the access tables
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Directory containing the tables; git commands run here
    #[arg(long, value_name = "DIR", env = "PARTNER_ACCESS_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Config file (defaults to .partner-access.yaml in the base directory)
    #[arg(long, value_name = "FILE", env = "PARTNER_ACCESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Group membership file, relative to the base directory
    #[arg(long, value_name = "FILE", env = "PARTNER_ACCESS_GROUP_FILE")]
    pub group_file: Option<PathBuf>,

    /// Repository permission file, relative to the base directory
    #[arg(long, value_name = "FILE", env = "PARTNER_ACCESS_REPO_FILE")]
    pub repo_file: Option<PathBuf>,

    /// Repository name in the permission file (defaults to the repo file's stem)
    #[arg(long, value_name = "NAME", env = "PARTNER_ACCESS_REPOSITORY")]
    pub repository: Option<String>,
}

impl TableArgs {
    /// Resolve flags, environment and config file into settings.
    pub fn resolve(&self, commit_message: Option<String>) -> Result<Settings> {
        let base_dir = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let overrides = ConfigFile {
            group_file: self.group_file.clone(),
            repo_file: self.repo_file.clone(),
            repository: self.repository.clone(),
            commit_message,
        };

        Ok(Settings::resolve(
            &base_dir,
            self.config.as_deref(),
            overrides,
        )?)
    }
}

/// Flags controlling the commit/push step
#[derive(Args, Debug, Clone)]
pub struct PushArgs {
    /// Commit message (defaults to a description of the change)
    #[arg(short, long, value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Write the tables but do not commit or push
    #[arg(long)]
    pub no_push: bool,
}

impl PushArgs {
    /// Commit and push from the base directory unless `--no-push` was given.
    ///
    /// Failures are reported but never returned: the tables have already
    /// been written and stay as they are.
    pub fn publish(&self, settings: &Settings, default_message: &str, out: &OutputConfig) {
        if self.no_push {
            out.print(Status::Info, "Skipping commit and push (--no-push)");
            return;
        }

        let message = settings
            .commit_message
            .as_deref()
            .unwrap_or(default_message);
        match Publisher::new(&settings.base_dir).publish(message) {
            PublishStatus::Pushed => out.print(Status::Ok, "Changes pushed successfully."),
            PublishStatus::Failed(error) => out.print(
                Status::Warn,
                format!("An error occurred while pushing changes: {}", error),
            ),
        }
    }
}

/// Parse an access type argument.
pub fn parse_access_type(value: &str) -> Result<AccessType, partner_access::error::Error> {
    value.parse()
}
