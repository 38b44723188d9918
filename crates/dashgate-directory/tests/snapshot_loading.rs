//! Loading directory snapshots from disk

use assert_matches::assert_matches;
use dashgate_core::{DashgateError, Role};
use dashgate_directory::{Directory, InMemoryDirectory, Snapshot};
use dashgate_testkit::{init_test_tracing, sample_dashboards, sample_users, write_sample_snapshot};
use std::fs;
use tempfile::TempDir;

fn snapshot_dir() -> TempDir {
    init_test_tracing();
    tempfile::tempdir().unwrap()
}

#[test]
fn loads_sample_snapshot_in_file_order() {
    let dir = snapshot_dir();
    write_sample_snapshot(dir.path()).unwrap();

    let snapshot = Snapshot::load_dir(dir.path()).unwrap();
    assert_eq!(snapshot.users, sample_users());
    assert_eq!(snapshot.dashboards, sample_dashboards());
    assert_eq!(snapshot.folders.len(), 4);
}

#[test]
fn missing_folders_file_means_no_folders() {
    let dir = snapshot_dir();
    write_sample_snapshot(dir.path()).unwrap();
    fs::remove_file(dir.path().join("folders.json")).unwrap();

    let snapshot = Snapshot::load_dir(dir.path()).unwrap();
    assert!(snapshot.folders.is_empty());
    assert_eq!(snapshot.users.len(), 7);
}

#[test]
fn missing_users_file_is_not_found() {
    let dir = snapshot_dir();
    write_sample_snapshot(dir.path()).unwrap();
    fs::remove_file(dir.path().join("users.json")).unwrap();

    let error = Snapshot::load_dir(dir.path()).unwrap_err();
    assert!(error.is_not_found());
}

#[test]
fn missing_directory_is_not_found() {
    let dir = snapshot_dir();

    let error = Snapshot::load_dir(&dir.path().join("nope")).unwrap_err();
    assert_matches!(error, DashgateError::NotFound { .. });
}

#[test]
fn empty_files_are_empty_lists() {
    let dir = snapshot_dir();
    fs::write(dir.path().join("users.json"), "").unwrap();
    fs::write(dir.path().join("dashboards.json"), "  \n").unwrap();

    let snapshot = Snapshot::load_dir(dir.path()).unwrap();
    assert_eq!(snapshot, Snapshot::default());
}

#[test]
fn single_object_is_read_as_one_record() {
    let dir = snapshot_dir();
    fs::write(
        dir.path().join("users.json"),
        r#"{ "uid": "u1", "role": "moderator", "company": "STTH" }"#,
    )
    .unwrap();
    fs::write(dir.path().join("dashboards.json"), "[]").unwrap();

    let snapshot = Snapshot::load_dir(dir.path()).unwrap();
    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.users[0].role, Role::Moderator);
}

#[test]
fn sparse_records_load_with_defaults() {
    let dir = snapshot_dir();
    fs::write(dir.path().join("users.json"), r#"[{ "uid": "u1", "groups": null }]"#).unwrap();
    fs::write(
        dir.path().join("dashboards.json"),
        r#"[{ "id": "d1", "access": { "direct": null, "company": null }, "restrictions": null }]"#,
    )
    .unwrap();

    let snapshot = Snapshot::load_dir(dir.path()).unwrap();
    assert_eq!(snapshot.users[0].role, Role::User);
    assert!(snapshot.users[0].groups.is_empty());
    assert!(snapshot.dashboards[0].access.is_empty());
    assert!(snapshot.dashboards[0].restrictions.revoke.is_empty());
}

#[test]
fn malformed_json_names_the_file() {
    let dir = snapshot_dir();
    fs::write(dir.path().join("users.json"), "[").unwrap();
    fs::write(dir.path().join("dashboards.json"), "[]").unwrap();

    let error = Snapshot::load_dir(dir.path()).unwrap_err();
    assert_matches!(error, DashgateError::Serialization { .. });
    assert!(error.to_string().contains("users.json"));
}

#[test]
fn save_then_load_preserves_directory() {
    let dir = snapshot_dir();
    write_sample_snapshot(dir.path()).unwrap();
    let snapshot = Snapshot::load_dir(dir.path()).unwrap();

    let copy = dir.path().join("copy");
    snapshot.save_dir(&copy).unwrap();

    let directory = InMemoryDirectory::from(Snapshot::load_dir(&copy).unwrap());
    assert_eq!(directory.users().len(), 7);
    assert_eq!(directory.dashboards().len(), 4);
    assert!(directory.folder(&"sales-emea".into()).is_some());
}
