//! # Publishing Changes
//!
//! After the tables are written, the change is staged, committed and pushed
//! from the base directory. This module wraps that sequence.
//!
//! ## Design
//!
//! The three git steps go through the [`GitOperations`] trait so the
//! sequence can be exercised in tests without a real repository.
//! [`DefaultGitOperations`] delegates to the functions in [`crate::git`].
//!
//! The sequence stops at the first failing step. [`Publisher::publish`]
//! catches that failure, logs it and reports it as
//! [`PublishStatus::Failed`]: the tables on disk are never rolled back, and a
//! failed push is not an error for the overall run.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Stage all changes (`git add .`).
    fn add_all(&self, work_dir: &Path) -> Result<()>;

    /// Commit staged changes (`git commit -m <message>`).
    fn commit(&self, work_dir: &Path, message: &str) -> Result<()>;

    /// Push to the upstream (`git push`).
    fn push(&self, work_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn add_all(&self, work_dir: &Path) -> Result<()> {
        crate::git::add_all(work_dir)
    }

    fn commit(&self, work_dir: &Path, message: &str) -> Result<()> {
        crate::git::commit(work_dir, message)
    }

    fn push(&self, work_dir: &Path) -> Result<()> {
        crate::git::push(work_dir)
    }
}

/// Outcome of a publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStatus {
    Pushed,
    /// A step failed; the message is the error text for display.
    Failed(String),
}

/// Runs the stage/commit/push sequence in a fixed working directory.
pub struct Publisher {
    git_ops: Box<dyn GitOperations>,
    work_dir: PathBuf,
}

impl Publisher {
    /// Creates a `Publisher` using the system `git`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_ops: Box::new(DefaultGitOperations),
            work_dir: work_dir.into(),
        }
    }

    /// Creates a `Publisher` with a custom `GitOperations` implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_ops,
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Stage, commit and push, stopping at the first failure.
    pub fn try_publish(&self, message: &str) -> Result<()> {
        self.git_ops.add_all(&self.work_dir)?;
        self.git_ops.commit(&self.work_dir, message)?;
        self.git_ops.push(&self.work_dir)?;
        Ok(())
    }

    /// Like [`Publisher::try_publish`], but a failure is logged and returned
    /// as a status instead of an error.
    pub fn publish(&self, message: &str) -> PublishStatus {
        match self.try_publish(message) {
            Ok(()) => {
                info!("pushed changes from {}", self.work_dir.display());
                PublishStatus::Pushed
            }
            Err(e) => {
                error!("publishing from {} failed: {}", self.work_dir.display(), e);
                PublishStatus::Failed(e.to_string())
            }
        }
    }
}
