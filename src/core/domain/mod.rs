//! Domain types.

mod entry;
mod keystore;

pub use entry::KeyEntry;
pub use keystore::{EntrySummary, KeyStore};
