//! Runtime settings.
//!
//! Resolves where the store lives, how long to wait for its lock and which
//! variable export mode assigns. Values come from command-line flags (which
//! clap also fills from `CLAUDE_KEY_SWITCH_*` environment variables) and
//! fall back to the defaults in [`constants`].

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::core::constants;
use crate::error::{Result, StoreError};

/// Resolved settings, passed explicitly to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Store file path.
    pub store_path: PathBuf,
    /// Bound on lock acquisition.
    pub lock_timeout: Duration,
    /// Variable assigned in export mode.
    pub var_name: String,
}

impl Settings {
    /// Resolve settings from optional overrides.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDir` if no store path is given and the
    /// home directory is unknown. The variable name is checked only when
    /// an export line is rendered.
    pub fn resolve(
        store_path: Option<PathBuf>,
        lock_timeout_ms: Option<u64>,
        var_name: Option<String>,
    ) -> Result<Self> {
        let store_path = match store_path {
            Some(path) => path,
            None => Self::default_store_path()?,
        };

        let var_name = var_name.unwrap_or_else(|| constants::DEFAULT_ENV_VAR.to_string());

        let settings = Self {
            store_path,
            lock_timeout: Duration::from_millis(
                lock_timeout_ms.unwrap_or(constants::DEFAULT_LOCK_TIMEOUT_MS),
            ),
            var_name,
        };

        debug!(
            store = %settings.store_path.display(),
            lock_timeout_ms = settings.lock_timeout.as_millis() as u64,
            var = %settings.var_name,
            "settings resolved"
        );
        Ok(settings)
    }

    /// `~/.claude-key-switch/keys.toml`.
    pub fn default_store_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(home.join(constants::STORE_DIR).join(constants::STORE_FILE))
    }
}
