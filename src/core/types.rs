//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An API key in clear text (e.g., `sk-ant-api03-...`).
///
/// Opaque to this tool: only checked for shape, never interpreted.
pub type Secret = String;

/// A human label attached to a key (e.g., `work`, `personal`).
pub type Label = String;

/// Zero-based index into the ordered key list.
pub type Cursor = usize;
