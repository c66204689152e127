//! Structured error types for the sortable engine.
//!
//! All failures inside the engine are contained locally. The only channel
//! that reaches the caller is `SortError` from drag resolution; persistence
//! failures are recorded and never surfaced as user-facing errors.

use thiserror::Error;

/// Errors raised while resolving a drag gesture.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("item not found in current view: {id}")]
    ItemNotFound { id: String },
}

/// Errors raised by the order persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("remote endpoint error: {0}")]
    Remote(String),
}
