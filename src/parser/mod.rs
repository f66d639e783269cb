//! Format classification and extraction.
//!
//! The object key decides, once per object, how decoded text is split into
//! [`LogUnit`]s. Every extractor works line by line and degrades content it
//! cannot parse to an unstructured unit instead of failing.

pub mod cloudtrail;
pub mod json;
pub mod text;

pub use cloudtrail::CloudTrailExtractor;
pub use json::JsonArrayExtractor;
pub use text::TextExtractor;

use crate::domain::LogUnit;
use tracing::debug;

const CLOUDTRAIL_MARKER: &str = "cloudtrail";
const JSON_SUFFIXES: [&str; 3] = [".json", ".json.gz", ".json.zip"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    CloudTrail,
    Json,
    Text,
}

impl LogFormat {
    /// Pick the extraction strategy for an object key.
    pub fn classify(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.contains(CLOUDTRAIL_MARKER) {
            LogFormat::CloudTrail
        } else if JSON_SUFFIXES.iter().any(|suffix| key.ends_with(suffix)) {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// What an extractor made of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed,
    /// The line did not have the expected shape and was kept as text.
    Degraded,
}

pub trait LogExtractor {
    fn format(&self) -> LogFormat;

    /// Append the units found in `line` to `units`.
    fn extract_line(&self, line: &str, units: &mut Vec<LogUnit>) -> LineOutcome;
}

/// Units extracted from one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub format: LogFormat,
    pub units: Vec<LogUnit>,
    pub lines: usize,
    pub degraded_lines: usize,
}

/// Split decoded text into log units according to the key's format.
pub fn extract(key: &str, text: &str) -> Vec<LogUnit> {
    extract_detailed(key, text).units
}

pub fn extract_detailed(key: &str, text: &str) -> Extraction {
    let extractor: &dyn LogExtractor = match LogFormat::classify(key) {
        LogFormat::CloudTrail => &CloudTrailExtractor,
        LogFormat::Json => &JsonArrayExtractor,
        LogFormat::Text => &TextExtractor,
    };

    let mut extraction = Extraction {
        format: extractor.format(),
        units: Vec::new(),
        lines: 0,
        degraded_lines: 0,
    };

    for line in non_empty_lines(text) {
        extraction.lines += 1;
        if extractor.extract_line(line, &mut extraction.units) == LineOutcome::Degraded {
            extraction.degraded_lines += 1;
        }
    }

    debug!(
        key,
        format = ?extraction.format,
        lines = extraction.lines,
        units = extraction.units.len(),
        degraded = extraction.degraded_lines,
        "Extracted log units"
    );
    extraction
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| !line.is_empty())
}
