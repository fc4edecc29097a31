//! Tests for `rotate`, `current` and the default command.

use crate::support::*;

#[test]
fn test_rotate_cycles_in_order() {
    let t = Test::with_keys(ABC);

    for expected in [KEY_B, KEY_C, KEY_A, KEY_B] {
        let output = t.rotate();
        assert_success(&output);
        assert_eq!(stdout(&output).trim_end(), expected);
    }
}

#[test]
fn test_rotate_prints_only_the_key() {
    let t = Test::with_keys(ABC);

    let output = t.rotate();
    assert_success(&output);
    assert_eq!(stdout(&output), format!("{}\n", KEY_B));
}

#[test]
fn test_current_does_not_advance() {
    let t = Test::with_keys(ABC);

    assert_eq!(t.current_key(), KEY_A);
    assert_eq!(t.current_key(), KEY_A);

    assert_success(&t.rotate());
    assert_eq!(t.current_key(), KEY_B);
}

#[test]
fn test_no_command_rotates() {
    let t = Test::with_keys(ABC);

    let output = t.run(&[]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_B);
    assert_eq!(t.current_key(), KEY_B);
}

#[test]
fn test_full_cycle_returns_to_start() {
    let keys = [KEY_A, KEY_B, KEY_C, KEY_D];
    let t = Test::with_keys(&keys);

    for _ in 0..keys.len() {
        assert_success(&t.rotate());
    }
    assert_eq!(t.current_key(), KEY_A);
}

#[test]
fn test_single_key_rotation_is_noop() {
    let t = Test::with_keys(&[KEY_A]);

    for _ in 0..3 {
        let output = t.rotate();
        assert_success(&output);
        assert_eq!(stdout(&output).trim_end(), KEY_A);
    }
}

#[test]
fn test_rotate_skips_disabled_keys() {
    let t = Test::new();
    t.write_store(&store_toml(0, &[KEY_A, KEY_B, KEY_C, KEY_D], &[1, 2]));

    let output = t.rotate();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_D);

    let output = t.rotate();
    assert_eq!(stdout(&output).trim_end(), KEY_A);
}

#[test]
fn test_rotate_from_disabled_cursor_takes_next_key() {
    let t = Test::new();
    t.write_store(&store_toml(0, ABC, &[0]));

    assert_eq!(t.current_key(), KEY_B);

    let output = t.rotate();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_B);
    assert!(t.read_store().contains("cursor = 1"));
}

#[test]
fn test_rotate_records_last_used() {
    let t = Test::with_keys(ABC);

    assert_success(&t.rotate());
    assert!(t.read_store().contains("last_used"));
}

#[test]
fn test_rotate_preserves_order_with_unknown_fields() {
    let t = Test::new();
    t.write_store(&format!(
        "installer = \"brew\"\n{}",
        store_toml(0, ABC, &[])
    ));

    assert_success(&t.rotate());
    let store = t.read_store();
    let a = store.find(KEY_A).unwrap();
    let b = store.find(KEY_B).unwrap();
    let c = store.find(KEY_C).unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_export_posix() {
    let t = Test::with_keys(ABC);

    let output = t.run(&["rotate", "--export"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim_end(),
        format!("export ANTHROPIC_API_KEY='{}'", KEY_B)
    );
}

#[test]
fn test_export_custom_var_and_fish() {
    let t = Test::with_keys(ABC);

    let output = t.run(&["current", "--export", "--shell", "fish", "--var", "CLAUDE_KEY"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim_end(),
        format!("set -gx CLAUDE_KEY '{}'", KEY_A)
    );
}

#[test]
fn test_export_var_from_env() {
    let t = Test::with_keys(ABC);

    let output = t
        .cmd()
        .env("CLAUDE_KEY_SWITCH_VAR", "OTHER_KEY")
        .args(["current", "--export"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "export OTHER_KEY=");
}

#[test]
fn test_export_rejects_bad_var_name() {
    let t = Test::with_keys(ABC);

    let output = t.run(&["current", "--export", "--var", "BAD-NAME"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid variable name");
}

#[test]
fn test_export_quotes_single_quote() {
    let t = Test::new();
    t.write_store("cursor = 0\n[[keys]]\nsecret = \"it's-a-key\"\n");

    let output = t.run(&["current", "--export"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim_end(),
        r"export ANTHROPIC_API_KEY='it'\''s-a-key'"
    );
}

#[test]
fn test_store_flag_overrides_home() {
    let t = Test::new();
    let custom = t.dir.path().join("custom.toml");
    std::fs::write(&custom, store_toml(1, ABC, &[])).unwrap();

    let output = t.run(&["current", "--store", custom.to_str().unwrap()]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_B);
    assert!(!t.store_path().exists());
}

#[test]
fn test_store_env_var() {
    let t = Test::new();
    let custom = t.dir.path().join("env.toml");
    std::fs::write(&custom, store_toml(2, ABC, &[])).unwrap();

    let output = t
        .cmd()
        .env("CLAUDE_KEY_SWITCH_STORE", &custom)
        .arg("current")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_C);
}

#[test]
fn test_bad_var_from_env_ignored_without_export() {
    let t = Test::with_keys(ABC);

    let output = t
        .cmd()
        .env("CLAUDE_KEY_SWITCH_VAR", "BAD-NAME")
        .arg("rotate")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), KEY_B);
}

#[test]
fn test_bad_var_with_export_leaves_cursor() {
    let t = Test::with_keys(ABC);
    let before = t.read_store();

    let output = t.run(&["rotate", "--export", "--var", "BAD-NAME"]);
    assert_exit_code(&output, 1);
    assert_eq!(t.read_store(), before);
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_stdout_is_an_error_not_a_panic() {
    use std::process::{Command, Stdio};

    let t = Test::with_keys(ABC);
    let full = std::fs::OpenOptions::new()
        .write(true)
        .open("/dev/full")
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_claude-key-switch"))
        .arg("current")
        .env("HOME", t.home.path())
        .env("USERPROFILE", t.home.path())
        .env("NO_COLOR", "1")
        .env_remove("CLAUDE_KEY_SWITCH_STORE")
        .current_dir(t.dir.path())
        .stdout(Stdio::from(full))
        .stderr(Stdio::piped())
        .output()
        .unwrap();

    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "io error");
}
