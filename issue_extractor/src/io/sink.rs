use async_trait::async_trait;
use serde_json::Value;
use snafu::{Backtrace, Snafu};

use crate::models::batch::BatchDate;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while writing the raw document to the store.
    #[snafu(display("Failed to write raw data: {message}"))]
    WriteError {
        message: String,
        backtrace: Backtrace,
    },

    /// An error occurred while reading the raw document back from the store.
    #[snafu(display("Failed to read raw data: {message}"))]
    ReadError {
        message: String,
        backtrace: Backtrace,
    },

    /// The records could not be serialized to, or deserialized from, JSON.
    #[snafu(display("Data conversion error: {source}"))]
    ConversionError {
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

/// A date-partitioned store for raw extracted documents.
///
/// One logical document per batch date; a write fully replaces the document
/// for that date.
#[async_trait]
pub trait RawStore {
    /// Writes the full record sequence as one document for `date`.
    ///
    /// Returns the key the document was written under.
    async fn write(&self, date: BatchDate, records: &[Value]) -> Result<String, SinkError>;

    /// Reads the document for `date` back.
    ///
    /// A missing document is a defined "no data" outcome, not an error.
    async fn read(&self, date: BatchDate) -> Result<Option<Vec<Value>>, SinkError>;
}
