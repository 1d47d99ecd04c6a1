//! Consistency checks between the membership and permission tables.
//!
//! Files edited by hand (or by older tooling) can drift from the invariants
//! the synchronizer maintains. [`check`] reports every such drift for one
//! repository without modifying anything.

use std::collections::BTreeMap;
use std::fmt;

use crate::access::{split_group_access_name, AccessType};
use crate::tables::{GroupMembership, RepoPermissions, GROUP_KIND};

/// A single inconsistency between the two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A membership key has partners but no permission entry.
    MissingPermission { group_access_name: String },
    /// A permission entry has no partners behind it.
    OrphanPermission { group_access_name: String },
    /// The descriptor's level disagrees with the key's access suffix.
    PermissionMismatch {
        group_access_name: String,
        expected: AccessType,
        found: AccessType,
    },
    /// The descriptor is not a group descriptor.
    UnexpectedKind {
        group_access_name: String,
        kind: String,
    },
    /// A membership key is present with no partners.
    EmptyGroup { group_access_name: String },
    /// A partner holds more than one access type in the same group.
    MultipleAccess {
        group: String,
        partner: String,
        access: Vec<AccessType>,
    },
    /// A membership key does not end in a known access suffix.
    UnrecognizedKey { key: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingPermission { group_access_name } => {
                write!(f, "{} has members but no permission entry", group_access_name)
            }
            Issue::OrphanPermission { group_access_name } => {
                write!(f, "{} has a permission entry but no members", group_access_name)
            }
            Issue::PermissionMismatch {
                group_access_name,
                expected,
                found,
            } => write!(
                f,
                "{} grants '{}' but its name implies '{}'",
                group_access_name, found, expected
            ),
            Issue::UnexpectedKind {
                group_access_name,
                kind,
            } => write!(
                f,
                "{} has descriptor type '{}' (expected '{}')",
                group_access_name, kind, GROUP_KIND
            ),
            Issue::EmptyGroup { group_access_name } => {
                write!(f, "{} has no members", group_access_name)
            }
            Issue::MultipleAccess {
                group,
                partner,
                access,
            } => {
                let levels: Vec<&str> = access.iter().map(AccessType::as_str).collect();
                write!(
                    f,
                    "{} holds multiple access types in {}: {}",
                    partner,
                    group,
                    levels.join(", ")
                )
            }
            Issue::UnrecognizedKey { key } => {
                write!(f, "{} does not end in _read, _triage or _write", key)
            }
        }
    }
}

/// Compare `groups` against `repository`'s section of `permissions`.
///
/// Issues are returned in a stable order: membership findings first (by
/// key), then permission findings (by key), then multiple-access findings.
pub fn check(
    groups: &GroupMembership,
    permissions: &RepoPermissions,
    repository: &str,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let empty = BTreeMap::new();
    let section = permissions.repository(repository).unwrap_or(&empty);

    // (group, partner) -> access types held
    let mut held: BTreeMap<(&str, &str), Vec<AccessType>> = BTreeMap::new();

    for (key, partners) in groups.iter() {
        let Some((group, access)) = split_group_access_name(key) else {
            issues.push(Issue::UnrecognizedKey { key: key.clone() });
            continue;
        };

        if partners.is_empty() {
            issues.push(Issue::EmptyGroup {
                group_access_name: key.clone(),
            });
        } else if !section.contains_key(key) {
            issues.push(Issue::MissingPermission {
                group_access_name: key.clone(),
            });
        }

        for partner in partners {
            held.entry((group, partner.as_str())).or_default().push(access);
        }
    }

    for (key, descriptor) in section {
        let has_members = groups.partners(key).is_some_and(|p| !p.is_empty());
        if !has_members {
            issues.push(Issue::OrphanPermission {
                group_access_name: key.clone(),
            });
        }
        if descriptor.kind != GROUP_KIND {
            issues.push(Issue::UnexpectedKind {
                group_access_name: key.clone(),
                kind: descriptor.kind.clone(),
            });
        }
        if let Some((_, expected)) = split_group_access_name(key) {
            if descriptor.permissions != expected {
                issues.push(Issue::PermissionMismatch {
                    group_access_name: key.clone(),
                    expected,
                    found: descriptor.permissions,
                });
            }
        }
    }

    for ((group, partner), mut access) in held {
        if access.len() > 1 {
            access.sort();
            access.dedup();
            issues.push(Issue::MultipleAccess {
                group: group.to_string(),
                partner: partner.to_string(),
                access,
            });
        }
    }

    issues
}
