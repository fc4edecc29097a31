//! Error types for claude-key-switch.
//!
//! Every failure kind a calling script may want to branch on maps to its
//! own process exit code through [`Error::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

use crate::core::constants::exit;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Rotation(RotationError::EmptyStore) => exit::EMPTY_STORE,
            Error::Rotation(RotationError::AllKeysDisabled) => exit::ALL_KEYS_DISABLED,
            Error::Store(StoreError::Corrupt { .. }) | Error::Store(StoreError::Read { .. }) => {
                exit::STORE_CORRUPT
            }
            Error::Store(StoreError::Busy { .. }) => exit::STORE_BUSY,
            Error::Store(StoreError::Write { .. }) => exit::STORE_WRITE,
            _ => exit::FAILURE,
        }
    }

    /// Short remediation hint, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Rotation(RotationError::EmptyStore) => {
                Some("run: claude-key-switch-install (or claude-key-switch add <key>)")
            }
            Error::Rotation(RotationError::AllKeysDisabled) => {
                Some("run: claude-key-switch enable <position|label>")
            }
            Error::Store(StoreError::Busy { .. }) => {
                Some("another claude-key-switch is running; try again")
            }
            Error::Store(StoreError::Corrupt { .. }) => {
                Some("fix the store by hand or rerun claude-key-switch-install")
            }
            Error::Store(StoreError::Read { .. }) => {
                Some("check that the store path is a readable file")
            }
            _ => None,
        }
    }
}

/// Persistence and locking errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is corrupt: {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to write store {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read store {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store is busy: could not lock {} within {waited_ms}ms", .path.display())]
    Busy { path: PathBuf, waited_ms: u64 },

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Rotation engine errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("no keys configured")]
    EmptyStore,

    #[error("all keys are disabled")]
    AllKeysDisabled,
}

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key cannot be empty")]
    EmptySecret,

    #[error("invalid key: {0}")]
    InvalidSecret(String),

    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("label '{0}' matches more than one key; use its position instead")]
    AmbiguousLabel(String),

    #[error("key {0} is disabled")]
    KeyDisabled(String),

    #[error("invalid variable name: {0}")]
    InvalidVarName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
