//! Shared test utilities for CLI E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_groups(tables::ONE_READER);
//!     fixture.command().args(["add", "example_group1", "p1", "write", "--no-push"]);
//! }
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::tables;
    pub use super::TestFixture;
}

/// Default table locations, relative to the fixture root.
pub const GROUP_FILE: &str = "groups/TestOfAutomation.yml";
pub const REPO_FILE: &str = "repos/Example_Repo.yml";

/// Table contents used across tests.
#[allow(dead_code)]
pub mod tables {
    /// `p1` holds read access in example_group1.
    pub const ONE_READER: &str = "example_group1_read:\n- p1\n";

    /// Permission entry matching [`ONE_READER`].
    pub const ONE_READER_REPO: &str = r#"Example_Repo:
  example_group1_read:
    type: group
    permissions: read
"#;

    /// Two readers in example_group1.
    pub const TWO_READERS: &str = "example_group1_read:\n- p1\n- p2\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "example_group1_read: [p1\n";
}

/// A temporary base directory holding the access tables.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the group membership file.
    pub fn with_groups(self, content: &str) -> Self {
        self.with_file(GROUP_FILE, content)
    }

    /// Write the repository permission file.
    pub fn with_repos(self, content: &str) -> Self {
        self.with_file(REPO_FILE, content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Parsed contents of a YAML file in the fixture.
    pub fn read_yaml(&self, path: &str) -> serde_yaml::Value {
        let content =
            std::fs::read_to_string(self.path().join(path)).expect("Failed to read file");
        serde_yaml::from_str(&content).expect("Failed to parse YAML")
    }

    /// Parsed group membership file.
    pub fn groups(&self) -> serde_yaml::Value {
        self.read_yaml(GROUP_FILE)
    }

    /// Parsed repository permission file.
    pub fn repos(&self) -> serde_yaml::Value {
        self.read_yaml(REPO_FILE)
    }

    /// A `partner-access` command running in the fixture directory, isolated
    /// from any `PARTNER_ACCESS_*` settings in the caller's environment.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("partner-access");
        cmd.current_dir(self.path())
            .env_remove("PARTNER_ACCESS_BASE_DIR")
            .env_remove("PARTNER_ACCESS_CONFIG")
            .env_remove("PARTNER_ACCESS_GROUP_FILE")
            .env_remove("PARTNER_ACCESS_REPO_FILE")
            .env_remove("PARTNER_ACCESS_REPOSITORY")
            .env_remove("PARTNER_ACCESS_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
