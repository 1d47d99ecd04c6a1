//! # Table Storage
//!
//! Loading and persisting the access tables.
//!
//! The synchronizer talks to storage through the [`TableStore`] trait so the
//! on-disk format can be swapped out in tests:
//!
//! - **[`YamlFileStore`]**: reads and writes the two YAML files. A missing
//!   file loads as an empty table. Both tables are written to temporary files
//!   in their target directories first and only then renamed over the
//!   targets, so a failed save leaves both files as they were.
//! - **[`MemoryStore`]**: keeps both tables in memory and counts saves.
//!
//! The free functions [`read_yaml`] and [`write_yaml`] are shared with the
//! single-file membership editor.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::tables::{GroupMembership, RepoPermissions};

/// Whether a file must exist before it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A missing file reads as an empty table.
    Optional,
    /// A missing file is an [`Error::FileNotFound`].
    Required,
}

/// Load/store pair used by the synchronizer.
pub trait TableStore {
    /// Load the group membership table.
    fn load_groups(&self) -> Result<GroupMembership>;

    /// Load the repository permission table.
    fn load_permissions(&self) -> Result<RepoPermissions>;

    /// Persist both tables, replacing their previous contents.
    fn save(&mut self, groups: &GroupMembership, permissions: &RepoPermissions) -> Result<()>;
}

/// Read and deserialize a YAML file.
///
/// Empty documents (including an explicit `null`) deserialize to
/// `T::default()`.
pub fn read_yaml<T>(path: &Path, presence: Presence) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && presence == Presence::Optional => {
            debug!("{} does not exist, starting from an empty table", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(Error::from_io(e, path)),
    };
    parse_yaml(&content, path)
}

/// Deserialize YAML text that was read from `path`.
pub fn parse_yaml<T>(content: &str, path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let parsed: Option<T> = serde_yaml::from_str(content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parsed.unwrap_or_default())
}

/// Serialize `value` and atomically replace `path` with it.
pub fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    StagedWrite::prepare(path, &yaml)?.commit()
}

/// New contents fully written to a temporary sibling of the target, waiting
/// to be renamed over it.
///
/// Preparing does every check that can fail (directory creation, read-only
/// targets, the write itself) so that several files can be prepared before
/// any of them is replaced.
struct StagedWrite {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `content` next to `path`. The target's permission bits are
    /// carried over; a read-only target is rejected.
    fn prepare(path: &Path, content: &str) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| Error::from_io(e, &dir))?;

        let existing = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::from_io(e, path)),
        };
        if existing.as_ref().is_some_and(|p| p.readonly()) {
            return Err(Error::PermissionDenied {
                path: path.to_path_buf(),
            });
        }

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| Error::from_io(e, path))?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        match existing {
            Some(permissions) => fs::set_permissions(tmp.path(), permissions)?,
            None => set_default_permissions(tmp.path())?,
        }

        Ok(Self {
            tmp,
            target: path.to_path_buf(),
        })
    }

    /// Rename the staged file over the target.
    fn commit(self) -> Result<()> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| Error::from_io(e.error, &target))?;
        debug!("wrote {}", target.display());
        Ok(())
    }
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// [`TableStore`] backed by the group and repository YAML files.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    group_path: PathBuf,
    repo_path: PathBuf,
}

impl YamlFileStore {
    pub fn new(group_path: impl Into<PathBuf>, repo_path: impl Into<PathBuf>) -> Self {
        Self {
            group_path: group_path.into(),
            repo_path: repo_path.into(),
        }
    }

    pub fn group_path(&self) -> &Path {
        &self.group_path
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }
}

impl TableStore for YamlFileStore {
    fn load_groups(&self) -> Result<GroupMembership> {
        read_yaml(&self.group_path, Presence::Optional)
    }

    fn load_permissions(&self) -> Result<RepoPermissions> {
        read_yaml(&self.repo_path, Presence::Optional)
    }

    fn save(&mut self, groups: &GroupMembership, permissions: &RepoPermissions) -> Result<()> {
        // Both files are staged before either is replaced.
        let groups_yaml = serde_yaml::to_string(groups)?;
        let permissions_yaml = serde_yaml::to_string(permissions)?;

        let staged_groups = StagedWrite::prepare(&self.group_path, &groups_yaml)?;
        let staged_permissions = StagedWrite::prepare(&self.repo_path, &permissions_yaml)?;

        staged_groups.commit()?;
        staged_permissions.commit()
    }
}

/// In-memory [`TableStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub groups: GroupMembership,
    pub permissions: RepoPermissions,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(groups: GroupMembership, permissions: RepoPermissions) -> Self {
        Self {
            groups,
            permissions,
            saves: 0,
        }
    }

    /// Number of times [`TableStore::save`] has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl TableStore for MemoryStore {
    fn load_groups(&self) -> Result<GroupMembership> {
        Ok(self.groups.clone())
    }

    fn load_permissions(&self) -> Result<RepoPermissions> {
        Ok(self.permissions.clone())
    }

    fn save(&mut self, groups: &GroupMembership, permissions: &RepoPermissions) -> Result<()> {
        self.groups = groups.clone();
        self.permissions = permissions.clone();
        self.saves += 1;
        Ok(())
    }
}
