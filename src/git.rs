//! Thin wrappers around the system `git` command.
//!
//! Uses whatever authentication the user's git is configured with (SSH
//! keys, credential helpers, tokens in `~/.gitconfig`).

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::Error;

/// Run `git <args>` in `work_dir` and return its stdout.
///
/// A non-zero exit status becomes [`Error::GitCommand`] carrying the
/// captured stderr.
pub fn run_git(work_dir: &Path, args: &[&str]) -> Result<String, Error> {
    let command = args.join(" ");
    debug!("git {} (in {})", command, work_dir.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(work_dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        // git prints some failures (e.g. "nothing to commit") on stdout only.
        let stderr = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(Error::GitCommand { command, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Stage every change in the working tree.
pub fn add_all(work_dir: &Path) -> Result<(), Error> {
    run_git(work_dir, &["add", "."]).map(|_| ())
}

/// Commit the staged changes with `message`.
pub fn commit(work_dir: &Path, message: &str) -> Result<(), Error> {
    run_git(work_dir, &["commit", "-m", message]).map(|_| ())
}

/// Push the current branch to its upstream.
pub fn push(work_dir: &Path) -> Result<(), Error> {
    run_git(work_dir, &["push"]).map(|_| ())
}
