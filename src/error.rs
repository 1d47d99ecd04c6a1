//! # Error Handling
//!
//! This module defines the centralized error type for the `partner-access`
//! library. It uses `thiserror` to build an `Error` enum covering every
//! failure mode of loading, mutating, persisting and publishing the access
//! tables.
//!
//! ## Key Components
//!
//! - **`Error`**: All errors the library can return. Each variant carries the
//!   context needed to print a useful message (file path, git command,
//!   captured stderr).
//! - **`Result<T>`**: Alias for `std::result::Result<T, Error>`.
//!
//! Only [`Error::GitCommand`] is recoverable from the CLI's point of view:
//! the publish step catches it and reports it without failing the run. Every
//! other variant aborts the current operation before any table is written.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for partner-access operations
#[derive(Error, Debug)]
pub enum Error {
    /// A file that must exist was not found.
    ///
    /// Optional tables never produce this error; a missing table is treated
    /// as empty.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A table or configuration file could not be parsed as YAML.
    #[error("YAML parsing error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The process lacks permission to read or write a file.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The edited repository's section of the permission table is not a map
    /// of group descriptors this crate can rewrite.
    #[error("Invalid permission entries for repository {repository}: {source}")]
    InvalidRepository {
        repository: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// An access type outside of `read`, `triage` and `write` was given.
    #[error("Invalid access type '{value}' (expected one of: read, triage, write)")]
    InvalidAccessType { value: String },

    /// The configuration file is structurally valid YAML but unusable.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A git command exited non-zero or could not be started.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// Serializing a table back to YAML failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Any other I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// `NotFound` and `PermissionDenied` become their dedicated variants so
    /// callers can report them by path; everything else stays an `Io` error.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
