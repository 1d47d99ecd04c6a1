//! # Configuration
//!
//! Resolves where the tables live and which repository they describe.
//!
//! ## Sources
//!
//! In priority order, highest wins:
//!
//! 1. CLI flags
//! 2. Environment variables (`PARTNER_ACCESS_*`, handled by clap)
//! 3. The YAML config file, `.partner-access.yaml` in the base directory
//!    or the path given with `--config`
//! 4. Built-in defaults from [`crate::defaults`]
//!
//! ## Config file format
//!
//! ```yaml
//! group_file: groups/partners.yml
//! repo_file: repos/platform.yml
//! repository: platform
//! commit_message: "Update partner access"
//! ```
//!
//! Relative file paths are resolved against the base directory. When
//! `repository` is not set anywhere, it is taken from the repo file's stem.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{
    repository_from_file, DEFAULT_CONFIG_FILENAME, DEFAULT_GROUP_FILE, DEFAULT_REPO_FILE,
};
use crate::error::{Error, Result};
use crate::store::{parse_yaml, read_yaml, Presence};

/// Settings that may come from the config file or from overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub group_file: Option<PathBuf>,
    #[serde(default)]
    pub repo_file: Option<PathBuf>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
}

impl ConfigFile {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merged_with(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            group_file: overrides.group_file.or(self.group_file),
            repo_file: overrides.repo_file.or(self.repo_file),
            repository: overrides.repository.or(self.repository),
            commit_message: overrides.commit_message.or(self.commit_message),
        }
    }
}

/// Parse a config file's YAML content.
pub fn parse(yaml_content: &str) -> Result<ConfigFile> {
    parse_yaml(yaml_content, Path::new(DEFAULT_CONFIG_FILENAME))
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory the tables live under and where git runs.
    pub base_dir: PathBuf,
    pub group_file: PathBuf,
    pub repo_file: PathBuf,
    pub repository: String,
    /// Fixed commit message, if configured.
    pub commit_message: Option<String>,
}

impl Settings {
    /// Resolve settings for `base_dir`.
    ///
    /// `config_path` names an explicit config file, which must exist. Without
    /// it, `<base_dir>/.partner-access.yaml` is used if present.
    pub fn resolve(
        base_dir: &Path,
        config_path: Option<&Path>,
        overrides: ConfigFile,
    ) -> Result<Self> {
        let from_file: ConfigFile = match config_path {
            Some(path) => read_yaml(path, Presence::Required)?,
            None => read_yaml(&base_dir.join(DEFAULT_CONFIG_FILENAME), Presence::Optional)?,
        };
        Self::from_layers(base_dir, from_file.merged_with(overrides))
    }

    /// Build settings from an already-merged configuration.
    pub fn from_layers(base_dir: &Path, config: ConfigFile) -> Result<Self> {
        let group_file = base_dir.join(
            config
                .group_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GROUP_FILE)),
        );
        let repo_file = base_dir.join(
            config
                .repo_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPO_FILE)),
        );

        let repository = match config.repository {
            Some(name) => name,
            None => repository_from_file(&repo_file).ok_or_else(|| Error::Config {
                message: format!(
                    "cannot derive a repository name from {}",
                    repo_file.display()
                ),
                hint: Some("set 'repository:' in the config file or pass --repository".to_string()),
            })?,
        };
        if repository.trim().is_empty() {
            return Err(Error::Config {
                message: "repository name is empty".to_string(),
                hint: Some("set 'repository:' in the config file or pass --repository".to_string()),
            });
        }

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            group_file,
            repo_file,
            repository,
            commit_message: config.commit_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings =
            Settings::from_layers(Path::new("/srv/access"), ConfigFile::default()).unwrap();
        assert_eq!(
            settings.group_file,
            PathBuf::from("/srv/access/groups/TestOfAutomation.yml")
        );
        assert_eq!(
            settings.repo_file,
            PathBuf::from("/srv/access/repos/Example_Repo.yml")
        );
        assert_eq!(settings.repository, "Example_Repo");
        assert_eq!(settings.commit_message, None);
    }

    #[test]
    fn test_repository_follows_repo_file() {
        let config = ConfigFile {
            repo_file: Some(PathBuf::from("repos/platform.yml")),
            ..Default::default()
        };
        let settings = Settings::from_layers(Path::new("."), config).unwrap();
        assert_eq!(settings.repository, "platform");
    }

    #[test]
    fn test_empty_repository_is_rejected() {
        let config = ConfigFile {
            repository: Some("  ".to_string()),
            ..Default::default()
        };
        let err = Settings::from_layers(Path::new("."), config).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_parse_config_file() {
        let config = parse(
            r#"
group_file: groups/partners.yml
repository: platform
commit_message: "Update partner access"
"#,
        )
        .unwrap();
        assert_eq!(config.group_file, Some(PathBuf::from("groups/partners.yml")));
        assert_eq!(config.repo_file, None);
        assert_eq!(config.repository.as_deref(), Some("platform"));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = parse("group_fle: groups/partners.yml\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(DEFAULT_CONFIG_FILENAME),
            "repository: from-file\ngroup_file: groups/file.yml\n",
        )
        .unwrap();

        let overrides = ConfigFile {
            repository: Some("from-flag".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(temp_dir.path(), None, overrides).unwrap();
        assert_eq!(settings.repository, "from-flag");
        assert_eq!(settings.group_file, temp_dir.path().join("groups/file.yml"));
    }

    #[test]
    fn test_missing_default_config_is_fine() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::resolve(temp_dir.path(), None, ConfigFile::default()).unwrap();
        assert_eq!(settings.repository, "Example_Repo");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        let err =
            Settings::resolve(temp_dir.path(), Some(&path), ConfigFile::default()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
