//! Key management commands.
//!
//! The non-interactive configuration path: add, remove, enable, disable
//! and select keys. Each command runs as one locked transaction.

use std::io::{self, Read};

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::domain::KeyEntry;
use crate::core::store::Store;
use crate::error::Result;

/// Append a key to the rotation.
///
/// `-` reads the key from stdin, keeping it out of shell history.
pub fn add(settings: &Settings, secret: &str, label: Option<&str>) -> Result<()> {
    let secret = if secret == "-" {
        read_stdin_secret()?
    } else {
        Zeroizing::new(secret.to_string())
    };

    let mut entry = KeyEntry::new(secret.as_str())?;
    if let Some(label) = label {
        entry = entry.with_label(label)?;
    }

    let store = Store::open(settings);
    let (position, total) = store.transact(|keys| {
        let index = keys.push(entry);
        Ok((index + 1, keys.len()))
    })?;

    info!(position, total, "key added");
    output::success(&format!(
        "added key {} ({} in rotation)",
        describe(position, label),
        total
    ));
    Ok(())
}

/// Remove a key.
pub fn rm(settings: &Settings, target: &str) -> Result<()> {
    let store = Store::open(settings);
    let (removed, remaining) = store.transact(|keys| {
        let index = keys.resolve(target)?;
        let removed = keys.remove(index)?;
        Ok((removed.to_string(), keys.len()))
    })?;

    info!(remaining, "key removed");
    output::success(&format!("removed {} ({} left)", removed, remaining));
    if remaining == 0 {
        output::hint(&format!(
            "no keys left; add one with {}",
            output::cmd("claude-key-switch add <key>")
        ));
    }
    Ok(())
}

/// Exclude a key from rotation.
pub fn disable(settings: &Settings, target: &str) -> Result<()> {
    let store = Store::open(settings);
    let (name, enabled) = store.transact(|keys| {
        let index = keys.resolve(target)?;
        keys.disable(index)?;
        Ok((keys.entries()[index].to_string(), keys.enabled_count()))
    })?;

    output::success(&format!("disabled {}", name));
    if enabled == 0 {
        output::warn("all keys are now disabled; rotation will fail until one is enabled");
    }
    Ok(())
}

/// Include a key in rotation again.
pub fn enable(settings: &Settings, target: &str) -> Result<()> {
    let store = Store::open(settings);
    let name = store.transact(|keys| {
        let index = keys.resolve(target)?;
        keys.enable(index)?;
        Ok(keys.entries()[index].to_string())
    })?;

    output::success(&format!("enabled {}", name));
    Ok(())
}

/// Make a key the active one.
pub fn select(settings: &Settings, target: &str) -> Result<()> {
    let store = Store::open(settings);
    let name = store.transact(|keys| {
        let index = keys.resolve(target)?;
        keys.select(index)?;
        Ok(keys.entries()[index].to_string())
    })?;

    output::success(&format!("now using {}", name));
    Ok(())
}

fn read_stdin_secret() -> Result<Zeroizing<String>> {
    let mut buf = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut buf)?;
    Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()))
}

fn describe(position: usize, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("#{} '{}'", position, label),
        None => format!("#{}", position),
    }
}
