use super::{FetchError, ObjectSource, content_type_for_key};
use crate::domain::RawObject;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Serves objects from `<root>/<bucket>/<key>` on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(bucket).join(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(FetchError::InvalidKey(format!("{bucket}/{key}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectSource for LocalDirSource {
    async fn fetch(&self, bucket: &str, key: &str, region: &str) -> Result<RawObject, FetchError> {
        let path = self.object_path(bucket, key)?;
        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                FetchError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            } else {
                FetchError::Io {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source,
                }
            }
        })?;

        debug!(bucket, key, size = bytes.len(), path = %path.display(), "Fetched object");

        let object = RawObject::new(bucket, key, region, bytes);
        Ok(match content_type_for_key(key) {
            Some(content_type) => object.with_content_type(content_type),
            None => object,
        })
    }
}
