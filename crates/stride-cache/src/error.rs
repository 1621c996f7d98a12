//! Store error types.

use thiserror::Error;

/// Errors that can occur when persisting client-local state.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to serialize value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to write the backing file.
    #[error("Store write failed: {0}")]
    WriteError(#[from] std::io::Error),

    /// The store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
