//! Test support utilities for claude-key-switch integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]


#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir, so the default store
/// (`$HOME/.claude-key-switch/keys.toml`) is private to the test.
/// Child processes use `.current_dir()` and `HOME`, so tests can safely run
/// in parallel.
pub struct Test {
    /// Working directory for child commands
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with no store.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create an environment whose store holds `secrets`, cursor on the first.
    ///
    /// Writes the file directly, the way the installer would.
    pub fn with_keys(secrets: &[&str]) -> Self {
        let t = Self::new();
        t.write_store(&store_toml(0, secrets, &[]));
        t
    }

    /// Default store location under the temp home.
    pub fn store_path(&self) -> PathBuf {
        self.home
            .path()
            .join(".claude-key-switch")
            .join("keys.toml")
    }

    /// Lock file beside the store.
    pub fn lock_path(&self) -> PathBuf {
        self.home
            .path()
            .join(".claude-key-switch")
            .join("keys.toml.lock")
    }

    /// Overwrite the store file with raw contents.
    pub fn write_store(&self, contents: &str) {
        let path = self.store_path();
        fs::create_dir_all(path.parent().unwrap()).expect("failed to create store dir");
        fs::write(&path, contents).expect("failed to write store");
    }

    /// Raw store file contents.
    pub fn read_store(&self) -> String {
        fs::read_to_string(self.store_path()).expect("failed to read store")
    }
}

/// Render a store file the way the installer writes it.
pub fn store_toml(cursor: usize, secrets: &[&str], disabled: &[usize]) -> String {
    let mut out = format!("version = 1\ncursor = {}\n", cursor);
    for (i, secret) in secrets.iter().enumerate() {
        out.push_str(&format!(
            "\n[[keys]]\nsecret = \"{}\"\nlabel = \"key{}\"\ndisabled = {}\n",
            secret,
            i + 1,
            disabled.contains(&i)
        ));
    }
    out
}
