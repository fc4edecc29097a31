//! Tests for failure kinds and their exit codes.

use crate::support::*;
use fs2::FileExt;
use predicates::prelude::*;
use std::fs::OpenOptions;

#[test]
fn test_rotate_without_store_is_empty_store() {
    let t = Test::new();

    let output = t.rotate();
    assert_exit_code(&output, EXIT_EMPTY_STORE);
    assert_stderr_contains(&output, "no keys configured");
    assert_single_line_error(&output);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_current_on_empty_store_is_empty_store() {
    let t = Test::new();
    t.write_store("version = 1\n");

    let output = t.current();
    assert_exit_code(&output, EXIT_EMPTY_STORE);
}

#[test]
fn test_empty_store_is_not_created() {
    let t = Test::new();

    assert_exit_code(&t.rotate(), EXIT_EMPTY_STORE);
    assert!(!t.store_path().exists());
}

#[test]
fn test_all_disabled() {
    let t = Test::new();
    t.write_store(&store_toml(1, ABC, &[0, 1, 2]));
    let before = t.read_store();

    let output = t.rotate();
    assert_exit_code(&output, EXIT_ALL_KEYS_DISABLED);
    assert_stderr_contains(&output, "all keys are disabled");
    assert_single_line_error(&output);

    assert_exit_code(&t.current(), EXIT_ALL_KEYS_DISABLED);
    assert_eq!(t.read_store(), before);
}

#[test]
fn test_cursor_out_of_range_is_corrupt() {
    let t = Test::new();
    t.write_store(&store_toml(7, ABC, &[]));

    let output = t.rotate();
    assert_exit_code(&output, EXIT_STORE_CORRUPT);
    assert_stderr_contains(&output, "corrupt");
    assert_single_line_error(&output);
}

#[test]
fn test_unparseable_store_is_corrupt() {
    let t = Test::new();
    t.write_store("cursor = [[[\n");

    let output = t.current();
    assert_exit_code(&output, EXIT_STORE_CORRUPT);
    assert_single_line_error(&output);
}

#[test]
fn test_store_path_is_directory_is_corrupt() {
    let t = Test::new();
    let dir = t.dir.path().join("store_is_dir");
    std::fs::create_dir(&dir).unwrap();

    t.cmd()
        .args(["current", "--store", dir.to_str().unwrap()])
        .assert()
        .code(EXIT_STORE_CORRUPT)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read store"));
}

#[test]
fn test_corrupt_store_is_left_alone() {
    let t = Test::new();
    t.write_store("cursor = [[[\n");

    assert_exit_code(&t.rotate(), EXIT_STORE_CORRUPT);
    assert_eq!(t.read_store(), "cursor = [[[\n");
}

#[test]
fn test_lock_held_elsewhere_is_busy() {
    let t = Test::with_keys(ABC);
    let before = t.read_store();

    let lock = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(t.lock_path())
        .unwrap();
    lock.lock_exclusive().unwrap();

    let output = t.run(&["rotate", "--lock-timeout", "150"]);
    assert_exit_code(&output, EXIT_STORE_BUSY);
    assert_stderr_contains(&output, "busy");
    assert_single_line_error(&output);
    assert_eq!(t.read_store(), before);

    FileExt::unlock(&lock).unwrap();
    assert_success(&t.rotate());
}

#[test]
fn test_lock_timeout_from_env() {
    let t = Test::with_keys(ABC);

    let lock = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(t.lock_path())
        .unwrap();
    lock.lock_exclusive().unwrap();

    let started = std::time::Instant::now();
    let output = t
        .cmd()
        .env("CLAUDE_KEY_SWITCH_LOCK_TIMEOUT", "100")
        .arg("current")
        .output()
        .unwrap();
    assert_exit_code(&output, EXIT_STORE_BUSY);
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
}

#[test]
fn test_write_failure() {
    let t = Test::new();
    let blocker = t.dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let store = blocker.join("keys.toml");

    let output = t.run(&["add", KEY_A, "--store", store.to_str().unwrap()]);
    assert_exit_code(&output, EXIT_STORE_WRITE);
    assert_single_line_error(&output);
}

#[test]
fn test_unknown_command_is_usage_error() {
    let t = Test::new();

    let output = t.run(&["frobnicate"]);
    assert_exit_code(&output, 2);
}
