pub mod local;

pub use local::LocalDirSource;

use crate::domain::RawObject;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },
    #[error("IO error while reading {bucket}/{key}: {source}")]
    Io {
        bucket: String,
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Object key escapes the source root: {0}")]
    InvalidKey(String),
}

/// Storage the hook fetches notified objects from.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str, region: &str) -> Result<RawObject, FetchError>;
}

/// Content-type hint derived from the key's extension.
pub fn content_type_for_key(key: &str) -> Option<&'static str> {
    let lower = key.to_lowercase();
    if lower.ends_with(".gz") {
        Some("application/gzip")
    } else if lower.ends_with(".zip") {
        Some("application/zip")
    } else {
        None
    }
}
