//! Access levels and group-access-name composition.
//!
//! A partner holds at most one [`AccessType`] per group. The membership and
//! permission tables address each (group, access) bucket by a composite key
//! of the form `"{group}_{access}"`, built by [`group_access_name`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Repository access level granted to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    Read,
    Triage,
    Write,
}

impl AccessType {
    /// Every access type, in ascending order of privilege.
    pub const ALL: [AccessType; 3] = [AccessType::Read, AccessType::Triage, AccessType::Write];

    /// Lowercase name as written to the tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Read => "read",
            AccessType::Triage => "triage",
            AccessType::Write => "write",
        }
    }

    /// The access types other than `self`.
    pub fn others(self) -> impl Iterator<Item = AccessType> {
        Self::ALL.into_iter().filter(move |a| *a != self)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" => Ok(AccessType::Read),
            "triage" => Ok(AccessType::Triage),
            "write" => Ok(AccessType::Write),
            _ => Err(Error::InvalidAccessType {
                value: s.to_string(),
            }),
        }
    }
}

/// Build the composite key for a group at an access level.
pub fn group_access_name(group: &str, access: AccessType) -> String {
    format!("{}_{}", group, access)
}

/// Split a composite key back into its group and access level.
///
/// Returns `None` when the key does not end in a known access suffix.
pub fn split_group_access_name(name: &str) -> Option<(&str, AccessType)> {
    let (group, suffix) = name.rsplit_once('_')?;
    if group.is_empty() {
        return None;
    }
    // Suffixes are matched case-sensitively; keys are always written lowercase.
    let access = AccessType::ALL.into_iter().find(|a| a.as_str() == suffix)?;
    Some((group, access))
}
