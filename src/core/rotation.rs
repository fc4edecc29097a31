//! Round-robin rotation over a [`KeyStore`].
//!
//! Rotation is strictly positional: the cursor moves to the next enabled
//! key in insertion order and wraps at the end. There is no weighting or
//! randomness, so repeated failures against the same service walk through
//! every usable key before any repeats.

use tracing::{debug, trace};

use crate::core::domain::{KeyEntry, KeyStore};
use crate::error::{Result, RotationError};

impl KeyStore {
    /// Index of the active key.
    ///
    /// The first enabled key at or after the cursor. For stores written by
    /// this tool that is the cursor itself.
    ///
    /// # Errors
    ///
    /// `EmptyStore` when there are no keys, `AllKeysDisabled` when none is usable.
    pub fn current_index(&self) -> Result<usize> {
        let cursor = self.cursor().ok_or(RotationError::EmptyStore)?;
        if self.is_empty() {
            return Err(RotationError::EmptyStore.into());
        }
        self.next_enabled_from(cursor)
            .ok_or_else(|| RotationError::AllKeysDisabled.into())
    }

    /// The active key, without moving the cursor.
    pub fn current(&self) -> Result<&KeyEntry> {
        let index = self.current_index()?;
        Ok(&self.entries()[index])
    }

    /// Move to the next enabled key after the cursor and return it.
    ///
    /// With a single usable key this returns that key again. Disabled keys
    /// are skipped. On error the cursor is left untouched.
    pub fn advance(&mut self) -> Result<&KeyEntry> {
        let current = self.current_index()?;
        let from = self.cursor().unwrap_or(current);
        let len = self.len();

        // At least one key is enabled, so the search always succeeds.
        let to = self
            .next_enabled_from((from + 1) % len)
            .ok_or(RotationError::AllKeysDisabled)?;

        trace!(from, to, len, "advancing cursor");
        if to == current {
            debug!(cursor = to, "single usable key, rotation is a no-op");
        }

        self.set_cursor(to);
        Ok(&self.entries()[to])
    }

    /// Advance, then stamp the new key's last-used time.
    pub fn rotate(&mut self, now: chrono::DateTime<chrono::Utc>) -> Result<&KeyEntry> {
        self.advance()?;
        let index = self.current_index()?;
        if let Some(entry) = self.entry_mut(index) {
            entry.touch(now);
        }
        Ok(&self.entries()[index])
    }
}
