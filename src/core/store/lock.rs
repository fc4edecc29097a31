//! Cross-process exclusive lock over the store.
//!
//! The lock lives on a sibling `<store>.lock` file rather than the store
//! itself, because saves replace the store file by rename and a lock held
//! on the old inode would no longer exclude anyone.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::{debug, trace};

use crate::core::constants;
use crate::error::{Result, StoreError};

/// Held exclusive lock. Released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Acquire the lock at `path`, waiting at most `timeout`.
    ///
    /// Creates the lock file (and its directory) if needed.
    ///
    /// # Errors
    ///
    /// `StoreError::Busy` if another holder keeps the lock past `timeout`,
    /// `StoreError::Write` if the lock file cannot be opened.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        let started = Instant::now();
        let poll = Duration::from_millis(constants::LOCK_POLL_INTERVAL_MS);

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    debug!(
                        path = %path.display(),
                        waited_ms = started.elapsed().as_millis() as u64,
                        "store lock acquired"
                    );
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if is_contended(&e) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        debug!(path = %path.display(), "store lock timed out");
                        return Err(StoreError::Busy {
                            path: path.to_path_buf(),
                            waited_ms: timeout.as_millis() as u64,
                        }
                        .into());
                    }
                    trace!(waited_ms = waited.as_millis() as u64, "store lock contended");
                    thread::sleep(poll.min(timeout - waited));
                }
                Err(source) => {
                    return Err(StoreError::Write {
                        path: path.to_path_buf(),
                        source,
                    }
                    .into())
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // Closing the descriptor releases it as well; unlock explicitly so
        // the release does not depend on every clone being closed.
        let _ = FileExt::unlock(&self.file);
        trace!(path = %self.path.display(), "store lock released");
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Create a directory (and parents), owner-only on Unix.
pub(crate) fn create_private_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}
