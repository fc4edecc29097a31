//! Constants used throughout claude-key-switch.
//!
//! Centralizes magic strings and configuration values.

/// Binary name, as printed by `--version`.
pub const APP_NAME: &str = "claude-key-switch";

/// Exact `--version` output.
pub const VERSION_LINE: &str = concat!("claude-key-switch v", env!("CARGO_PKG_VERSION"));

/// Store directory relative to HOME (~/.claude-key-switch).
pub const STORE_DIR: &str = ".claude-key-switch";

/// Store file name inside [`STORE_DIR`].
pub const STORE_FILE: &str = "keys.toml";

/// Suffix appended to the store path to form its lock file.
pub const LOCK_SUFFIX: &str = "lock";

/// Current on-disk format version.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Default bound on lock acquisition, in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

/// Interval between lock attempts, in milliseconds.
pub const LOCK_POLL_INTERVAL_MS: u64 = 25;

/// Environment variable that receives the key in `--export` mode.
pub const DEFAULT_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "CLAUDE_KEY_SWITCH_LOG";

/// Process exit codes.
pub mod exit {
    pub const FAILURE: i32 = 1;
    pub const EMPTY_STORE: i32 = 3;
    pub const ALL_KEYS_DISABLED: i32 = 4;
    pub const STORE_CORRUPT: i32 = 5;
    pub const STORE_BUSY: i32 = 6;
    pub const STORE_WRITE: i32 = 7;
}
