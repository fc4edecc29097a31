//! Filesystem persistence for the key store.
//!
//! The store is a TOML file. Writes go to a temp file in the same
//! directory, which is synced and then renamed over the target, so a reader
//! sees either the old store or the new one and never a partial write.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::lock::create_private_dir;
use crate::core::domain::KeyStore;
use crate::error::{Result, StoreError};

/// Read the store at `path`.
///
/// A missing or blank file is an empty store.
///
/// # Errors
///
/// `StoreError::Corrupt` if the contents cannot be parsed or break the
/// cursor invariant, `StoreError::Read` on other I/O failures.
pub fn read(path: &Path) -> Result<KeyStore> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no store file, treating as empty");
            return Ok(KeyStore::new());
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(corrupt(path, "not valid UTF-8"));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            }
            .into())
        }
    };

    parse(path, &contents)
}

/// Parse store contents. `path` is only used for error messages.
pub fn parse(path: &Path, contents: &str) -> Result<KeyStore> {
    if contents.trim().is_empty() {
        return Ok(KeyStore::new());
    }

    let mut store: KeyStore =
        toml::from_str(contents).map_err(|e| corrupt(path, e.message()))?;
    store.normalize();
    store.check().map_err(|reason| corrupt(path, &reason))?;

    debug!(
        path = %path.display(),
        keys = store.len(),
        cursor = ?store.cursor(),
        "store loaded"
    );
    Ok(store)
}

/// Atomically replace the store at `path`.
///
/// # Errors
///
/// `StoreError::Corrupt` if `store` breaks its invariant (nothing is
/// written), `StoreError::Write` on I/O failure (the old file is kept).
pub fn write(path: &Path, store: &KeyStore) -> Result<()> {
    store.check().map_err(|reason| corrupt(path, &reason))?;

    let contents = toml::to_string_pretty(store).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
    })?;

    let staged = stage(path, contents.as_bytes()).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    commit(staged, path)?;

    debug!(
        path = %path.display(),
        keys = store.len(),
        cursor = ?store.cursor(),
        "store saved"
    );
    Ok(())
}

/// Write `bytes` to a synced temp file beside `path`.
pub(crate) fn stage(path: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
    let dir = parent_dir(path);
    create_private_dir(dir)?;

    // NamedTempFile is created 0600 on Unix.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Rename a staged temp file over `path`.
pub(crate) fn commit(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged.persist(path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    #[cfg(unix)]
    {
        // Make the rename itself durable.
        if let Err(e) = fs::File::open(parent_dir(path)).and_then(|d| d.sync_all()) {
            debug!(error = %e, "could not sync store directory");
        }
    }

    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

fn corrupt(path: &Path, reason: &str) -> crate::error::Error {
    StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: reason.replace('\n', " ").trim().to_string(),
    }
    .into()
}
