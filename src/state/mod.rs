//! Window layout persistence
//!
//! The layout store belongs to the outer application, but the record format
//! is fixed here so saved layouts round-trip losslessly.

pub mod schema;
pub mod storage;

pub use schema::{PersistedWindow, WindowSnapshot};
pub use storage::{StoreConfig, WindowStore};

/// Error types for layout persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}
