use bytes::Bytes;

/// An object fetched from storage, exactly as the source returned it.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub bucket: String,
    pub key: String,
    pub region: String,
    /// Content type declared by the store, if any. Only used as a decompression hint.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl RawObject {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        region: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            region: region.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// `<bucket>/<key>`, the value shipped as `s3_object_key`.
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }
}
