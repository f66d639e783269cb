use super::{LineOutcome, LogExtractor, LogFormat};
use crate::domain::{JsonMap, LogUnit};
use tracing::warn;

/// Each line holds a JSON array of objects; every object is one unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArrayExtractor;

impl LogExtractor for JsonArrayExtractor {
    fn format(&self) -> LogFormat {
        LogFormat::Json
    }

    fn extract_line(&self, line: &str, units: &mut Vec<LogUnit>) -> LineOutcome {
        match serde_json::from_str::<Vec<JsonMap>>(line) {
            Ok(entries) => {
                units.extend(entries.into_iter().map(LogUnit::Structured));
                LineOutcome::Parsed
            }
            Err(e) => {
                warn!(error = %e, "Could not parse line as a JSON array, sending it as a string");
                units.push(LogUnit::Unstructured(line.to_string()));
                LineOutcome::Degraded
            }
        }
    }
}
