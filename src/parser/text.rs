use super::{LineOutcome, LogExtractor, LogFormat};
use crate::domain::LogUnit;

/// Every line is one unstructured unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExtractor;

impl LogExtractor for TextExtractor {
    fn format(&self) -> LogFormat {
        LogFormat::Text
    }

    fn extract_line(&self, line: &str, units: &mut Vec<LogUnit>) -> LineOutcome {
        units.push(LogUnit::Unstructured(line.to_string()));
        LineOutcome::Parsed
    }
}
