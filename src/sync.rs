//! # Access Synchronizer
//!
//! Adds and removes partners while keeping the group membership table and
//! the repository permission table consistent with each other.
//!
//! ## Invariants
//!
//! After every successful operation:
//!
//! - A partner appears under at most one access type per group. Adding a
//!   partner at a new access level moves them out of the others.
//! - No membership key is empty.
//! - The configured repository has a permission entry for a
//!   group-access-name exactly when that key has at least one partner.
//!
//! Each operation loads both tables, mutates them in memory and writes both
//! back in full. Removals that find nothing to remove do not write.

use log::{debug, info};

use crate::access::{group_access_name, AccessType};
use crate::error::Result;
use crate::store::TableStore;
use crate::tables::{GroupMembership, Removal, RepoPermissions, GROUP_KIND};

/// Result of [`AccessSynchronizer::add_partner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub partner: String,
    pub group_access_name: String,
    /// `false` when the partner already held exactly this access.
    pub changed: bool,
    /// Group-access-names the partner was moved out of.
    pub moved_from: Vec<String>,
}

/// Result of [`AccessSynchronizer::remove_partner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The partner was removed. `emptied` is set when the group-access-name
    /// lost its last partner and was dropped from both tables.
    Removed {
        partner: String,
        group_access_name: String,
        emptied: bool,
    },
    /// No membership key with this name exists. Nothing was written.
    GroupNotFound { group_access_name: String },
    /// The key exists but does not list the partner. Nothing was written.
    PartnerNotFound {
        partner: String,
        group_access_name: String,
    },
}

impl RemoveOutcome {
    /// Whether the tables were rewritten.
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed { .. })
    }
}

/// Keeps group membership and repository permissions in step for one
/// repository.
pub struct AccessSynchronizer<S: TableStore> {
    store: S,
    repository: String,
}

impl<S: TableStore> AccessSynchronizer<S> {
    /// Create a synchronizer that mirrors membership into `repository`'s
    /// section of the permission table.
    pub fn new(store: S, repository: impl Into<String>) -> Self {
        Self {
            store,
            repository: repository.into(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Grant `partner` `access` in `group`, moving them out of any other
    /// access level they held in the same group.
    pub fn add_partner(
        &mut self,
        group: &str,
        partner: &str,
        access: AccessType,
    ) -> Result<AddOutcome> {
        let (mut groups, mut permissions) = self.load()?;

        let key = group_access_name(group, access);
        let added = groups.insert_partner(&key, partner);

        let mut moved_from = Vec::new();
        for other in access.others() {
            let other_key = group_access_name(group, other);
            if let Removal::Removed { emptied } = groups.remove_partner(&other_key, partner) {
                debug!("moved {} out of {}", partner, other_key);
                if emptied {
                    permissions.revoke(&self.repository, &other_key);
                }
                moved_from.push(other_key);
            }
        }
        self.prune(&mut groups, &mut permissions);

        let stale_descriptor = permissions
            .get(&self.repository, &key)
            .map_or(true, |d| d.permissions != access || d.kind != GROUP_KIND);
        permissions.grant(&self.repository, &key, access);

        self.store.save(&groups, &permissions)?;
        info!("added {} to {} on {}", partner, key, self.repository);

        Ok(AddOutcome {
            partner: partner.to_string(),
            group_access_name: key,
            changed: added || !moved_from.is_empty() || stale_descriptor,
            moved_from,
        })
    }

    /// Revoke `partner`'s `access` in `group`.
    ///
    /// When the partner was the last one under the group-access-name, the key
    /// is removed from both tables. The repository section is left in place.
    pub fn remove_partner(
        &mut self,
        group: &str,
        partner: &str,
        access: AccessType,
    ) -> Result<RemoveOutcome> {
        let (mut groups, mut permissions) = self.load()?;

        let key = group_access_name(group, access);
        let emptied = match groups.remove_partner(&key, partner) {
            Removal::NoSuchGroup => {
                debug!("{} not found, nothing to remove", key);
                return Ok(RemoveOutcome::GroupNotFound {
                    group_access_name: key,
                });
            }
            Removal::NotAMember => {
                debug!("{} is not a member of {}, nothing to remove", partner, key);
                return Ok(RemoveOutcome::PartnerNotFound {
                    partner: partner.to_string(),
                    group_access_name: key,
                });
            }
            Removal::Removed { emptied } => emptied,
        };

        if emptied {
            permissions.revoke(&self.repository, &key);
        }
        self.prune(&mut groups, &mut permissions);

        self.store.save(&groups, &permissions)?;
        info!("removed {} from {} on {}", partner, key, self.repository);

        Ok(RemoveOutcome::Removed {
            partner: partner.to_string(),
            group_access_name: key,
            emptied,
        })
    }

    fn load(&self) -> Result<(GroupMembership, RepoPermissions)> {
        let groups = self.store.load_groups()?;
        let mut permissions = self.store.load_permissions()?;
        permissions.parse_repository(&self.repository)?;
        Ok((groups, permissions))
    }

    /// Drop keys left without partners (including ones written that way by
    /// hand) along with their permission entries.
    fn prune(&self, groups: &mut GroupMembership, permissions: &mut RepoPermissions) {
        for name in groups.prune_empty() {
            debug!("dropping empty key {}", name);
            permissions.revoke(&self.repository, &name);
        }
    }
}
