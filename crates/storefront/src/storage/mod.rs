//! Key-value persistence for the cart.
//!
//! # Architecture
//!
//! - Backends store raw strings under string keys
//! - Serialization (JSON) is the cart store's job, not the backend's
//! - One key holds the whole cart; every successful mutation overwrites it
//!
//! # Backends
//!
//! - [`MemoryStorage`] - shared in-process map, for tests and ephemeral carts
//! - [`FileStorage`] - one file per key under a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default key the cart is persisted under.
pub const CART_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes are not valid UTF-8.
    #[error("Value for key {0} is not valid UTF-8")]
    InvalidUtf8(String),

    /// Backend is unusable (e.g. a lock was poisoned by a panicking writer).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A persistent string key-value store.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
