//! Client-local key/value storage backing guest carts.
//!
//! [`JsonFileStore`] keeps one file per key under a directory and survives
//! restarts; [`InMemoryStore`] is used when no directory is configured.

pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::InMemoryStore;

/// Default per-value limit, matching a browser's local storage budget.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;
