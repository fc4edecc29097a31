//! Quick status overview command.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::store::Store;
use crate::error::{Error, Result, RotationError};

/// Show where the store is and what is active.
pub fn execute(settings: &Settings) -> Result<()> {
    let store = Store::open(settings);
    let path = store.path().display().to_string();

    output::section("claude-key-switch status");
    output::kv("store", output::path(&path));

    if !store.exists() {
        output::kv("keys", "none");
        println!();
        output::dimmed(&format!(
            "Run {} or {} to configure keys",
            output::cmd("claude-key-switch-install"),
            output::cmd("claude-key-switch add <key>")
        ));
        return Ok(());
    }

    let (total, enabled, current) = store.read(|keys| {
        let current = match keys.current() {
            Ok(entry) => Some(entry.clone()),
            Err(Error::Rotation(RotationError::EmptyStore))
            | Err(Error::Rotation(RotationError::AllKeysDisabled)) => None,
            Err(e) => return Err(e),
        };
        Ok((keys.len(), keys.enabled_count(), current))
    })?;

    output::kv("keys", format!("{} ({} enabled)", total, enabled));
    match current {
        Some(entry) => {
            output::kv("current", &entry);
            if let Some(at) = entry.last_used() {
                output::kv("last used", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        None if total == 0 => output::kv("current", "none"),
        None => output::kv("current", "none (all keys disabled)"),
    }

    Ok(())
}
