use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Object-created notification delivered by the storage service.
///
/// Only the fields the hook reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

impl S3Event {
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default)]
    pub event_version: String,
    #[serde(default)]
    pub event_source: String,
    #[serde(default)]
    pub aws_region: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_name: String,
    pub s3: S3Entity,
}

impl S3EventRecord {
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// The object key as it appears in the notification (URL-encoded).
    pub fn raw_key(&self) -> &str {
        &self.s3.object.key
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    #[serde(default)]
    pub s3_schema_version: String,
    #[serde(default)]
    pub configuration_id: String,
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
    #[serde(default)]
    pub arn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "eTag", default)]
    pub e_tag: Option<String>,
    #[serde(default)]
    pub sequencer: Option<String>,
}

/// Decode a notification object key.
///
/// Keys arrive form-URL-encoded (`+` for spaces, `%XX` escapes). A key that
/// does not decode to valid UTF-8 is returned unchanged.
pub fn decode_object_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match percent_decode_str(&plus_decoded).decode_utf8() {
        Ok(decoded) => {
            if !decoded.eq_ignore_ascii_case(raw) {
                debug!(from = raw, to = %decoded, "Decoded object key");
            }
            decoded.into_owned()
        }
        Err(e) => {
            error!(key = raw, error = %e, "Could not unescape object key, using it as is");
            raw.to_string()
        }
    }
}
