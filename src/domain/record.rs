use super::log_unit::{JsonMap, LogUnit};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_TYPE: &str = "type";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_S3_KEY: &str = "s3_object_key";
pub const FIELD_AWS_REGION: &str = "aws_region";

pub const DEFAULT_LOG_TYPE: &str = "s3_hook";

/// A normalized log record ready for serialization.
///
/// This is the canonical representation of a record at the end of the pipeline.
/// Field order carries no meaning; keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichedRecord {
    fields: JsonMap,
}

impl EnrichedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<LogUnit> for EnrichedRecord {
    fn from(unit: LogUnit) -> Self {
        match unit {
            LogUnit::Structured(fields) => Self { fields },
            LogUnit::Unstructured(line) => {
                let mut record = Self::new();
                record.insert(FIELD_MESSAGE, line);
                record
            }
        }
    }
}

impl From<JsonMap> for EnrichedRecord {
    fn from(fields: JsonMap) -> Self {
        Self { fields }
    }
}
