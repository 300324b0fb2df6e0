#![forbid(unsafe_code)]
#![cfg(feature = "serde")]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn cli(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("conges-cli").unwrap();
    cmd.env_remove("CONGES_STORE").arg("--store").arg(store);
    cmd
}

#[test]
fn overlap_requires_confirmation() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("conges.json");
    let pending = dir.path().join("conges.json.pending.json");

    cli(&store)
        .args(["add", "--member", "Alice", "--start", "2024-06-01", "--end", "2024-06-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: Alice"));

    cli(&store)
        .args(["add", "--member", "Bob", "--start", "10/06/2024", "--end", "2024-06-20"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Alice (01/06/2024 → 14/06/2024)"));
    assert!(pending.exists());

    cli(&store)
        .arg("pending")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: Bob"));

    cli(&store)
        .arg("confirm")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved (with overlap): Bob"));
    assert!(!pending.exists());

    cli(&store).arg("confirm").assert().code(1);

    cli(&store)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice | 01/06/2024 → 14/06/2024"))
        .stdout(predicate::str::contains("Bob | 10/06/2024 → 20/06/2024"));
}

#[test]
fn unreadable_pending_file_does_not_block_commands() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("conges.json");
    let pending = dir.path().join("conges.json.pending.json");

    cli(&store)
        .args(["add", "--member", "Alice", "--start", "2024-06-01", "--end", "2024-06-14"])
        .assert()
        .success();
    std::fs::write(&pending, "{garbage").unwrap();

    cli(&store)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice | 01/06/2024 → 14/06/2024"))
        .stderr(predicate::str::contains("ignoring saved pending booking"));

    cli(&store)
        .arg("cancel")
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded unreadable pending booking"));
    assert!(!pending.exists());

    cli(&store).arg("cancel").assert().code(1);
}

#[test]
fn cancel_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("conges.csv");

    cli(&store)
        .args(["add", "--member", "Alice", "--start", "2024-06-01", "--end", "2024-06-14"])
        .assert()
        .success();
    cli(&store)
        .args(["add", "--member", "Alice", "--start", "2024-06-05", "--end", "2024-06-06"])
        .assert()
        .code(2);
    cli(&store).arg("cancel").assert().success();

    let raw = std::fs::read_to_string(&store).unwrap();
    assert_eq!(raw.lines().count(), 2);
}

#[test]
fn invalid_requests_are_reported() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("conges.json");

    cli(&store)
        .args(["add", "--member", "Alice", "--start", "2024-06-14", "--end", "2024-06-01"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid input"));

    cli(&store)
        .args(["remove", "--member", "Alice", "--start", "2024-06-01", "--end", "2024-06-14"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));

    assert!(!store.exists());
}

#[test]
fn remove_and_calendar() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("conges.json");

    cli(&store)
        .args(["add", "--member", "Carol", "--start", "2024-07-01", "--end", "2024-07-05"])
        .assert()
        .success();

    cli(&store)
        .args(["calendar", "--year", "2024", "--month", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1*"))
        .stdout(predicate::str::contains("05/07/2024: Carol"));

    cli(&store)
        .args(["legend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol"));

    cli(&store)
        .args(["remove", "--member", "Carol", "--start", "2024-07-01", "--end", "2024-07-05"])
        .assert()
        .success();

    cli(&store)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No vacation recorded yet"));
}
