use super::{LineOutcome, LogExtractor, LogFormat};
use crate::domain::{JsonMap, LogUnit};
use serde_json::Value;
use tracing::{debug, error, warn};

const RECORDS_FIELD: &str = "Records";

/// Each line is a JSON object wrapping its entries in a top-level `Records` array.
#[derive(Debug, Default, Clone, Copy)]
pub struct CloudTrailExtractor;

impl LogExtractor for CloudTrailExtractor {
    fn format(&self) -> LogFormat {
        LogFormat::CloudTrail
    }

    fn extract_line(&self, line: &str, units: &mut Vec<LogUnit>) -> LineOutcome {
        let wrapper: Value = match serde_json::from_str(line) {
            Ok(wrapper) => wrapper,
            Err(e) => {
                error!(error = %e, "Could not parse cloudtrail log, sending it as a string");
                units.push(LogUnit::Unstructured(line.to_string()));
                return LineOutcome::Degraded;
            }
        };

        let Some(records) = wrapper.get(RECORDS_FIELD).and_then(Value::as_array) else {
            warn!(
                field = RECORDS_FIELD,
                "Could not find expected records array in cloudtrail log, sending it as a string"
            );
            units.push(LogUnit::Unstructured(line.to_string()));
            return LineOutcome::Degraded;
        };

        debug!(count = records.len(), "Found cloudtrail records");
        units.extend(records.iter().map(record_unit));
        LineOutcome::Parsed
    }
}

/// Copy one record into a standalone unit.
///
/// The record goes through its own text form so that every unit owns a fresh
/// mapping; an entry that is not an object keeps that text as its message.
fn record_unit(record: &Value) -> LogUnit {
    let text = record.to_string();
    match serde_json::from_str::<JsonMap>(&text) {
        Ok(fields) => LogUnit::Structured(fields),
        Err(e) => {
            warn!(error = %e, "Could not parse cloudtrail record, sending it as a string");
            LogUnit::Unstructured(text)
        }
    }
}
