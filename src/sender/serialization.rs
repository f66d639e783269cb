use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Serialized record is {size} bytes, above the {limit} byte limit")]
    RecordTooLarge { size: usize, limit: usize },
}

/// Encodes records into the JSON byte buffers handed to a sink.
#[derive(Debug, Clone, Default)]
pub struct RecordSerializer {
    max_record_bytes: Option<usize>,
}

impl RecordSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject records whose encoding exceeds `limit` bytes.
    pub fn with_max_record_bytes(mut self, limit: usize) -> Self {
        self.max_record_bytes = Some(limit);
        self
    }

    pub fn serialize<T: Serialize + ?Sized>(&self, record: &T) -> Result<Vec<u8>, SerializationError> {
        let encoded = serde_json::to_vec(record)?;

        if let Some(limit) = self.max_record_bytes
            && encoded.len() > limit
        {
            return Err(SerializationError::RecordTooLarge {
                size: encoded.len(),
                limit,
            });
        }

        Ok(encoded)
    }

    /// Serialize a record, logging and dropping it on failure.
    pub fn serialize_or_drop<T: Serialize + ?Sized>(&self, record: &T) -> Option<Vec<u8>> {
        match self.serialize(record) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                error!(error = %e, "Error occurred while serializing log, it will be dropped");
                None
            }
        }
    }
}
