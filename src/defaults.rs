//! Default values for partner-access configuration.
//!
//! Every value here can be overridden by a CLI flag, an environment
//! variable or the `.partner-access.yaml` config file.

use std::path::Path;

/// Name of the optional config file looked up in the base directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".partner-access.yaml";

/// Group membership file, relative to the base directory.
pub const DEFAULT_GROUP_FILE: &str = "groups/TestOfAutomation.yml";

/// Repository permission file, relative to the base directory.
pub const DEFAULT_REPO_FILE: &str = "repos/Example_Repo.yml";

/// Derive a repository name from its permission file name.
///
/// `repos/Example_Repo.yml` names the repository `Example_Repo`.
pub fn repository_from_file(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
