//! Crate-level error type.

use issue_extractor::io::sink::SinkError;
use thiserror::Error;

/// The unified error type for the `warehouse` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the database layer (connection, DDL, or a statement —
    /// including a failed cast while projecting the semi-structured payload).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error reading the raw document from the object store.
    #[error("Raw store error: {0}")]
    Store(#[from] SinkError),
}
