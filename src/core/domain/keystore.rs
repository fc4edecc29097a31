//! Key store type.
//!
//! The ordered list of keys plus the cursor naming the active one. Order
//! is rotation order and is kept exactly as inserted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::KeyEntry;
use crate::core::constants;
use crate::core::types::Cursor;
use crate::core::validation;
use crate::error::{Result, ValidationError};

fn format_version() -> u32 {
    constants::STORE_FORMAT_VERSION
}

/// Ordered keys and the rotation cursor.
///
/// Invariant: `cursor` is `None` exactly when there are no entries, and
/// is in range otherwise. [`KeyStore::check`] verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStore {
    #[serde(default = "format_version")]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cursor: Option<Cursor>,
    #[serde(default, rename = "keys")]
    entries: Vec<KeyEntry>,
}

/// Display-safe view of one entry, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// 1-based position in rotation order.
    pub position: usize,
    pub label: Option<String>,
    pub masked: String,
    pub disabled: bool,
    pub current: bool,
    pub last_used: Option<DateTime<Utc>>,
}

impl KeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            version: constants::STORE_FORMAT_VERSION,
            cursor: None,
            entries: Vec::new(),
        }
    }

    /// Build a store from entries, cursor on the first one.
    pub fn from_entries(entries: Vec<KeyEntry>) -> Self {
        let cursor = if entries.is_empty() { None } else { Some(0) };
        Self {
            version: constants::STORE_FORMAT_VERSION,
            cursor,
            entries,
        }
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw cursor value.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Number of entries not disabled.
    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_enabled()).count()
    }

    /// Verify the store invariant and the shape of every key.
    ///
    /// Returns a human-readable reason on failure.
    pub fn check(&self) -> std::result::Result<(), String> {
        match (self.cursor, self.entries.len()) {
            (Some(c), 0) => return Err(format!("cursor {} set on an empty store", c)),
            (Some(c), len) if c >= len => {
                return Err(format!("cursor {} out of range for {} key(s)", c, len))
            }
            (None, len) if len > 0 => return Err("cursor missing".to_string()),
            _ => {}
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if let Err(e) = validation::validate_secret(entry.secret()) {
                return Err(format!("key {}: {}", i + 1, e));
            }
        }

        Ok(())
    }

    /// Fill in a missing cursor on a non-empty store.
    ///
    /// Older or hand-written stores may omit it; the first key is then current.
    pub(crate) fn normalize(&mut self) {
        if self.cursor.is_none() && !self.entries.is_empty() {
            self.cursor = Some(0);
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: Cursor) {
        debug_assert!(cursor < self.entries.len());
        self.cursor = Some(cursor);
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut KeyEntry> {
        self.entries.get_mut(index)
    }

    /// Append a key at the end of the rotation order.
    ///
    /// The first key added becomes current.
    pub fn push(&mut self, entry: KeyEntry) -> usize {
        self.entries.push(entry);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        self.entries.len() - 1
    }

    /// Resolve a 1-based position or a unique label to an index.
    pub fn resolve(&self, target: &str) -> Result<usize> {
        let target = target.trim();
        if let Ok(position) = target.parse::<usize>() {
            if position == 0 || position > self.entries.len() {
                return Err(ValidationError::KeyNotFound(format!("position {}", position)).into());
            }
            return Ok(position - 1);
        }

        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.label() == Some(target))
            .map(|(i, _)| i);

        match (matches.next(), matches.next()) {
            (Some(i), None) => Ok(i),
            (Some(_), Some(_)) => Err(ValidationError::AmbiguousLabel(target.to_string()).into()),
            (None, _) => Err(ValidationError::KeyNotFound(target.to_string()).into()),
        }
    }

    /// Remove the entry at `index`.
    ///
    /// The cursor keeps pointing at the same key. When the current key is
    /// removed, the key that followed it becomes current.
    pub fn remove(&mut self, index: usize) -> Result<KeyEntry> {
        if index >= self.entries.len() {
            return Err(ValidationError::KeyNotFound(format!("position {}", index + 1)).into());
        }

        let removed = self.entries.remove(index);
        let len = self.entries.len();

        self.cursor = match self.cursor {
            _ if len == 0 => None,
            Some(c) if index < c => Some(c - 1),
            Some(c) if index == c => {
                let start = if c >= len { 0 } else { c };
                Some(self.next_enabled_from(start).unwrap_or(start))
            }
            other => other,
        };

        Ok(removed)
    }

    /// Mark the entry at `index` disabled.
    ///
    /// Disabling the current key moves the cursor to the next enabled one,
    /// if any.
    pub fn disable(&mut self, index: usize) -> Result<()> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| ValidationError::KeyNotFound(format!("position {}", index + 1)))?;
        entry.set_disabled(true);

        if self.cursor == Some(index) {
            if let Some(next) = self.next_enabled_from((index + 1) % self.entries.len()) {
                self.cursor = Some(next);
            }
        }
        Ok(())
    }

    /// Clear the disabled flag on the entry at `index`.
    ///
    /// If the current key is itself disabled, the re-enabled key becomes current.
    pub fn enable(&mut self, index: usize) -> Result<()> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| ValidationError::KeyNotFound(format!("position {}", index + 1)))?;
        entry.set_disabled(false);

        let cursor_disabled = self
            .cursor
            .and_then(|c| self.entries.get(c))
            .map_or(true, KeyEntry::is_disabled);
        if cursor_disabled {
            self.cursor = Some(index);
        }
        Ok(())
    }

    /// Make the enabled entry at `index` current.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let entry = self
            .entries
            .get(index)
            .ok_or_else(|| ValidationError::KeyNotFound(format!("position {}", index + 1)))?;
        if entry.is_disabled() {
            return Err(ValidationError::KeyDisabled(format!("{}", index + 1)).into());
        }
        self.cursor = Some(index);
        Ok(())
    }

    /// First enabled index at or after `start`, wrapping once around.
    pub(crate) fn next_enabled_from(&self, start: usize) -> Option<usize> {
        let len = self.entries.len();
        (0..len)
            .map(|step| (start + step) % len)
            .find(|&i| self.entries[i].is_enabled())
    }

    /// Display-safe listing in rotation order.
    pub fn summaries(&self) -> Vec<EntrySummary> {
        let current = self.current_index().ok();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| EntrySummary {
                position: i + 1,
                label: e.label().map(str::to_string),
                masked: e.masked(),
                disabled: e.is_disabled(),
                current: current == Some(i),
                last_used: e.last_used(),
            })
            .collect()
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}
