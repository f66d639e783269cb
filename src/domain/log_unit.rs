use serde_json::{Map, Value};

/// Loosely typed JSON object used for structured log content.
pub type JsonMap = Map<String, Value>;

/// One candidate log entry produced by extraction, before enrichment.
///
/// Extraction never fails outright: content that cannot be parsed into the
/// expected shape degrades to `Unstructured` carrying the original text.
#[derive(Debug, Clone, PartialEq)]
pub enum LogUnit {
    /// Fields copied from a JSON object found in the content.
    Structured(JsonMap),
    /// A raw text line, shipped under `message`.
    Unstructured(String),
}

impl LogUnit {
    pub fn is_structured(&self) -> bool {
        matches!(self, LogUnit::Structured(_))
    }
}

impl From<JsonMap> for LogUnit {
    fn from(fields: JsonMap) -> Self {
        LogUnit::Structured(fields)
    }
}

impl From<&str> for LogUnit {
    fn from(line: &str) -> Self {
        LogUnit::Unstructured(line.to_string())
    }
}
