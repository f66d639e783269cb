//! Record encoding and delivery.

pub mod ndjson;
pub mod serialization;

pub use ndjson::NdjsonSink;
pub use serialization::{RecordSerializer, SerializationError};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error while writing records: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for an object's serialized records.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Deliver `records` in order, returning how many were accepted.
    async fn send(&self, records: Vec<Vec<u8>>) -> Result<usize, SinkError>;
}
