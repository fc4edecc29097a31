//! claude-key-switch - Rotate through multiple API keys sequentially.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── switch        # rotate / current (the script-facing commands)
//! │   ├── keys          # add, rm, enable, disable, use
//! │   ├── list          # masked listing
//! │   ├── status        # store overview
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Settings resolution
//!     ├── domain/       # KeyEntry, KeyStore
//!     ├── rotation      # Round-robin current/advance
//!     ├── store/        # Persistence and locking
//!     │   ├── mod       # Store handle, locked read/transact
//!     │   ├── fs        # TOML load, atomic save
//!     │   └── lock      # Exclusive lock with bounded wait
//!     ├── env           # Shell export rendering
//!     └── validation    # Key/label/variable checks, masking
//! ```
//!
//! # Guarantees
//!
//! - Rotation is strict round-robin in insertion order, skipping disabled keys
//! - Every read-modify-write of the store happens under an exclusive lock
//! - Saves are atomic: a crash never leaves a partially written store
//! - Each failure kind exits with its own code

pub mod cli;
pub mod core;
pub mod error;
