//! Object store adapter: maps logical object names to stored blobs.
//!
//! The store is an opaque byte-level collaborator — it never sees plaintext
//! and the envelope codec never sees names or paths. `put` is all-or-nothing:
//! a partially written blob must never be observable by a concurrent `get`;
//! implementations stage writes and publish them atomically.

pub mod fs;

pub use fs::FsStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by object stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No blob is stored under the requested name. Kept distinct from other
    /// failures — a missing object leaks no cryptographic information.
    #[error("object not found")]
    NotFound,

    /// The underlying storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Byte store keyed by logical object name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `blob` under `name`, replacing any existing blob for that name.
    async fn put(&self, name: &str, blob: &[u8]) -> Result<(), StoreError>;

    /// Fetch the blob stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no blob exists for `name`.
    async fn get(&self, name: &str) -> Result<Vec<u8>, StoreError>;
}
