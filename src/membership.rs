//! Single-file membership editing.
//!
//! Edits one membership file directly: partners are appended to or removed
//! from a single key, with no access-type linkage, no permission table and
//! no push. The file must already exist.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::store::{read_yaml, write_yaml, Presence};
use crate::tables::{GroupMembership, Removal};
use crate::sync::RemoveOutcome;

/// Append `partners` under `key` in the membership file at `path`.
///
/// Partners already listed are skipped. Returns the partners that were
/// actually added; the file is rewritten only when that list is non-empty.
pub fn add_members(path: &Path, key: &str, partners: &[String]) -> Result<Vec<String>> {
    let mut groups: GroupMembership = read_yaml(path, Presence::Required)?;

    let added: Vec<String> = partners
        .iter()
        .filter(|partner| groups.insert_partner(key, partner))
        .cloned()
        .collect();

    if !added.is_empty() {
        write_yaml(path, &groups)?;
        info!("added {} partner(s) to {} in {}", added.len(), key, path.display());
    }
    Ok(added)
}

/// Remove `partner` from `key` in the membership file at `path`.
///
/// Removing the last partner deletes the key. Nothing is written when the
/// key or partner is missing.
pub fn remove_member(path: &Path, key: &str, partner: &str) -> Result<RemoveOutcome> {
    let mut groups: GroupMembership = read_yaml(path, Presence::Required)?;

    let outcome = match groups.remove_partner(key, partner) {
        Removal::NoSuchGroup => {
            return Ok(RemoveOutcome::GroupNotFound {
                group_access_name: key.to_string(),
            })
        }
        Removal::NotAMember => {
            return Ok(RemoveOutcome::PartnerNotFound {
                partner: partner.to_string(),
                group_access_name: key.to_string(),
            })
        }
        Removal::Removed { emptied } => RemoveOutcome::Removed {
            partner: partner.to_string(),
            group_access_name: key.to_string(),
            emptied,
        },
    };

    write_yaml(path, &groups)?;
    info!("removed {} from {} in {}", partner, key, path.display());
    Ok(outcome)
}
