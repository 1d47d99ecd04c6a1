//! # Access Tables
//!
//! Typed in-memory forms of the two YAML files the synchronizer edits.
//!
//! - **[`GroupMembership`]**: group-access-name to the partners in it.
//!
//!   ```yaml
//!   example_group1_read:
//!   - partner1
//!   - partner2
//!   example_group1_write:
//!   - partner3
//!   ```
//!
//! - **[`RepoPermissions`]**: repository name to the group-access-names that
//!   have access to it, each with a [`PermissionDescriptor`].
//!
//!   ```yaml
//!   Example_Repo:
//!     example_group1_read:
//!       type: group
//!       permissions: read
//!   ```
//!
//! Both serialize transparently as plain maps. Keys are kept in sorted order
//! (`BTreeMap`) so rewrites produce stable diffs; partner lists keep their
//! insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::access::AccessType;
use crate::error::{Error, Result};

/// Descriptor kind used for every entry the synchronizer writes.
pub const GROUP_KIND: &str = "group";

/// Result of removing a partner from a membership key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The key does not exist.
    NoSuchGroup,
    /// The key exists but the partner is not in it.
    NotAMember,
    /// The partner was removed. `emptied` is set when the key was deleted
    /// because no partners remain.
    Removed { emptied: bool },
}

/// Mapping from group-access-name to an ordered, duplicate-free partner list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMembership {
    groups: BTreeMap<String, Vec<String>>,
}

impl GroupMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partners under `name`, if the key exists.
    pub fn partners(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn contains_partner(&self, name: &str, partner: &str) -> bool {
        self.groups
            .get(name)
            .is_some_and(|partners| partners.iter().any(|p| p == partner))
    }

    /// Append `partner` under `name`, creating the key if needed.
    ///
    /// Returns `false` if the partner was already present.
    pub fn insert_partner(&mut self, name: &str, partner: &str) -> bool {
        let partners = self.groups.entry(name.to_string()).or_default();
        if partners.iter().any(|p| p == partner) {
            return false;
        }
        partners.push(partner.to_string());
        true
    }

    /// Remove `partner` from `name`, deleting the key once it is empty.
    pub fn remove_partner(&mut self, name: &str, partner: &str) -> Removal {
        let Some(partners) = self.groups.get_mut(name) else {
            return Removal::NoSuchGroup;
        };
        let Some(index) = partners.iter().position(|p| p == partner) else {
            return Removal::NotAMember;
        };
        partners.remove(index);

        let emptied = partners.is_empty();
        if emptied {
            self.groups.remove(name);
        }
        Removal::Removed { emptied }
    }

    /// Delete every key that lists no partners, returning the deleted names.
    pub fn prune_empty(&mut self) -> Vec<String> {
        let mut pruned = Vec::new();
        self.groups.retain(|name, partners| {
            if partners.is_empty() {
                pruned.push(name.clone());
            }
            !partners.is_empty()
        });
        pruned
    }

    /// Iterate over `(group-access-name, partners)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Permission granted to one group-access-name on a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    /// Principal kind; always `group` for entries written by this crate.
    #[serde(rename = "type")]
    pub kind: String,
    pub permissions: AccessType,
    /// Fields this crate does not interpret, written back unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PermissionDescriptor {
    /// A group descriptor at the given access level.
    pub fn group(permissions: AccessType) -> Self {
        Self {
            kind: GROUP_KIND.to_string(),
            permissions,
            extra: BTreeMap::new(),
        }
    }
}

/// Group descriptors of one repository.
pub type RepoEntries = BTreeMap<String, PermissionDescriptor>;

/// One repository's section of the permission file.
///
/// Sections that do not fit [`RepoEntries`] (other access levels, other
/// principal layouts) are kept as raw YAML so rewriting the file never loses
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Section {
    Entries(RepoEntries),
    Raw(serde_yaml::Value),
}

/// Mapping from repository name to its group permission entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPermissions {
    repos: BTreeMap<String, Section>,
}

impl RepoPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `repository`'s section strictly so it can be edited.
    ///
    /// A missing or `null` section is fine. Any other section that is not a
    /// map of group descriptors is an [`Error::InvalidRepository`].
    pub fn parse_repository(&mut self, repository: &str) -> Result<()> {
        let Some(section) = self.repos.get_mut(repository) else {
            return Ok(());
        };
        if let Section::Raw(value) = section {
            let entries = if value.is_null() {
                RepoEntries::new()
            } else {
                serde_yaml::from_value(value.clone()).map_err(|source| {
                    Error::InvalidRepository {
                        repository: repository.to_string(),
                        source,
                    }
                })?
            };
            *section = Section::Entries(entries);
        }
        Ok(())
    }

    /// Entries for `repository`, if it has a parsed section.
    pub fn repository(&self, repository: &str) -> Option<&RepoEntries> {
        match self.repos.get(repository)? {
            Section::Entries(entries) => Some(entries),
            Section::Raw(_) => None,
        }
    }

    pub fn get(&self, repository: &str, name: &str) -> Option<&PermissionDescriptor> {
        self.repository(repository)?.get(name)
    }

    /// Set the group descriptor for `name` on `repository`, creating the
    /// repository section if needed. Unmodelled fields of an existing entry
    /// are kept.
    ///
    /// A section that was never parsed with [`parse_repository`] and did not
    /// load as entries is replaced.
    ///
    /// [`parse_repository`]: RepoPermissions::parse_repository
    pub fn grant(&mut self, repository: &str, name: &str, access: AccessType) {
        let section = self
            .repos
            .entry(repository.to_string())
            .or_insert_with(|| Section::Entries(RepoEntries::new()));
        if let Section::Raw(_) = section {
            *section = Section::Entries(RepoEntries::new());
        }
        let Section::Entries(entries) = section else {
            return;
        };

        match entries.get_mut(name) {
            Some(descriptor) => {
                descriptor.kind = GROUP_KIND.to_string();
                descriptor.permissions = access;
            }
            None => {
                entries.insert(name.to_string(), PermissionDescriptor::group(access));
            }
        }
    }

    /// Remove the entry for `name` on `repository`.
    ///
    /// The repository section itself is kept even when it becomes empty.
    pub fn revoke(&mut self, repository: &str, name: &str) -> Option<PermissionDescriptor> {
        match self.repos.get_mut(repository)? {
            Section::Entries(entries) => entries.remove(name),
            Section::Raw(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
