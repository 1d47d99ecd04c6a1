//! # Partner Access Library
//!
//! Bookkeeping for partner access to a repository. Access is recorded in two
//! linked YAML files: a group membership file listing the partners in each
//! group-access-name (`{group}_{read|triage|write}`), and a repository
//! permission file granting each populated group-access-name its level on
//! the repository. This library keeps the two in step.
//!
//! ## Quick Example
//!
//! ```
//! use partner_access::access::AccessType;
//! use partner_access::store::MemoryStore;
//! use partner_access::sync::AccessSynchronizer;
//!
//! let mut sync = AccessSynchronizer::new(MemoryStore::new(), "Example_Repo");
//!
//! sync.add_partner("example_group1", "p1", AccessType::Read).unwrap();
//! // Changing the access level moves the partner rather than adding a second entry.
//! sync.add_partner("example_group1", "p1", AccessType::Write).unwrap();
//!
//! let store = sync.store();
//! assert!(!store.groups.contains_group("example_group1_read"));
//! assert_eq!(store.groups.partners("example_group1_write").unwrap(), ["p1"]);
//! assert!(store.permissions.get("Example_Repo", "example_group1_read").is_none());
//! ```
//!
//! ## Core Concepts
//!
//! - **Tables (`tables`)**: typed membership and permission maps.
//! - **Storage (`store`)**: the `TableStore` trait, with YAML-file and
//!   in-memory implementations.
//! - **Synchronizer (`sync`)**: `add_partner` / `remove_partner`, the only
//!   operations that mutate both tables.
//! - **Publishing (`publish`, `git`)**: stage, commit and push the result.
//! - **Single-file editing (`membership`)**: append/remove partners in one
//!   membership file without the permission linkage.
//! - **Consistency (`consistency`)**: report drift between the two tables.

pub mod access;
pub mod config;
pub mod consistency;
pub mod defaults;
pub mod error;
pub mod git;
pub mod membership;
pub mod output;
pub mod publish;
pub mod store;
pub mod sync;
pub mod tables;

#[cfg(test)]
mod sync_proptest;
