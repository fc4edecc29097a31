//! Key store persistence and locking.
//!
//! [`Store`] is a handle on one store file. Every operation that touches
//! the file goes through [`Store::read`] or [`Store::transact`], which hold
//! the exclusive lock for the whole load/modify/save sequence.
//!
//! ## Example
//!
//! ```ignore
//! let store = Store::open(&settings);
//! let key = store.rotate()?;
//! println!("{}", key.secret());
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants;
use crate::core::domain::{EntrySummary, KeyEntry, KeyStore};
use crate::error::Result;

pub mod fs;
mod lock;

pub use lock::StoreLock;

/// Handle on a store file and its lock.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl Store {
    /// Handle for the store at `path`.
    pub fn new(path: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        let path = path.into();
        let lock_path = lock_path_for(&path);
        Self {
            path,
            lock_path,
            lock_timeout,
        }
    }

    /// Handle for the store named by `settings`.
    pub fn open(settings: &Settings) -> Self {
        Self::new(settings.store_path.clone(), settings.lock_timeout)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Take the exclusive lock, waiting at most the configured timeout.
    pub fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(&self.lock_path, self.lock_timeout)
    }

    /// Load the store. Does not lock; callers outside this module want
    /// [`Store::read`] instead.
    pub fn load(&self) -> Result<KeyStore> {
        fs::read(&self.path)
    }

    /// Atomically save the store. Does not lock; see [`Store::transact`].
    pub fn save(&self, keys: &KeyStore) -> Result<()> {
        fs::write(&self.path, keys)
    }

    /// Run `f` over the store while holding the lock.
    pub fn read<T>(&self, f: impl FnOnce(&KeyStore) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let keys = self.load()?;
        f(&keys)
    }

    /// Run `f` over the store while holding the lock, then save.
    ///
    /// Nothing is written when `f` fails or leaves the store unchanged.
    pub fn transact<T>(&self, f: impl FnOnce(&mut KeyStore) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let before = self.load()?;
        let mut keys = before.clone();

        let out = f(&mut keys)?;

        if keys != before {
            self.save(&keys)?;
        } else {
            debug!("store unchanged, skipping save");
        }
        Ok(out)
    }

    /// Display-safe listing of every key.
    pub fn list(&self) -> Result<Vec<EntrySummary>> {
        self.read(|keys| Ok(keys.summaries()))
    }

    /// The active key.
    pub fn current(&self) -> Result<KeyEntry> {
        self.read(|keys| keys.current().cloned())
    }

    /// Advance to the next usable key and persist the new cursor.
    pub fn rotate(&self) -> Result<KeyEntry> {
        self.transact(|keys| keys.rotate(chrono::Utc::now()).cloned())
    }
}

/// `<store>.lock` beside the store file.
fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| constants::STORE_FILE.into());
    name.push(".");
    name.push(constants::LOCK_SUFFIX);
    path.with_file_name(name)
}
