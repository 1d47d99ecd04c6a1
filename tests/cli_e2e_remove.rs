//! End-to-end tests for the `remove` command.

mod common;
use common::prelude::*;

#[test]
fn test_remove_last_partner_drops_key_from_both_tables() {
    let fixture = TestFixture::new()
        .with_groups(tables::ONE_READER)
        .with_repos(tables::ONE_READER_REPO);

    fixture
        .command()
        .args(["remove", "example_group1", "p1", "read", "--no-push"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Partner p1 removed from example_group1_read",
        ))
        .stdout(predicate::str::contains("is now empty"));

    let groups = fixture.groups();
    assert!(groups.get("example_group1_read").is_none());

    // The repository section stays, with no entries
    let repos = fixture.repos();
    let section = &repos["Example_Repo"];
    assert!(section.as_mapping().unwrap().is_empty());
}

#[test]
fn test_remove_keeps_permission_entry_while_members_remain() {
    let fixture = TestFixture::new()
        .with_groups(tables::TWO_READERS)
        .with_repos(tables::ONE_READER_REPO);

    fixture
        .command()
        .args(["remove", "example_group1", "p1", "read", "--no-push"])
        .assert()
        .success();

    let groups = fixture.groups();
    let readers = groups["example_group1_read"].as_sequence().unwrap();
    assert_eq!(readers.len(), 1);
    assert_eq!(readers[0].as_str(), Some("p2"));

    let repos = fixture.repos();
    assert!(repos["Example_Repo"]["example_group1_read"].is_mapping());
}

#[test]
fn test_remove_unknown_group_does_not_write() {
    let fixture = TestFixture::new()
        .with_groups(tables::ONE_READER)
        .with_repos(tables::ONE_READER_REPO);

    fixture
        .command()
        .args(["remove", "example_group1", "p1", "write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group example_group1_write not found"))
        // nothing changed, so nothing is published
        .stdout(predicate::str::contains("push").not());

    fixture.child(common::GROUP_FILE).assert(tables::ONE_READER);
    fixture
        .child(common::REPO_FILE)
        .assert(tables::ONE_READER_REPO);
}

#[test]
fn test_remove_unknown_partner_does_not_write() {
    let fixture = TestFixture::new().with_groups(tables::ONE_READER);

    fixture
        .command()
        .args(["remove", "example_group1", "p9", "read", "--no-push"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Partner p9 not found in example_group1_read",
        ));

    fixture.child(common::GROUP_FILE).assert(tables::ONE_READER);
    fixture
        .child(common::REPO_FILE)
        .assert(predicate::path::missing());
}

#[test]
fn test_remove_from_missing_tables_reports_group_not_found() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["remove", "example_group1", "p1", "read", "--no-push"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));

    fixture
        .child(common::GROUP_FILE)
        .assert(predicate::path::missing());
}

#[test]
fn test_remove_requires_access_type() {
    let mut cmd = cargo_bin_cmd!("partner-access");

    cmd.args(["remove", "example_group1", "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
