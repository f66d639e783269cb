//! Field enrichment.
//!
//! Every record gets provenance fields (`type`, `s3_object_key`, `aws_region`)
//! and, when a path template is configured, one field per key segment.

pub mod template;

pub use template::{PathFieldTemplate, TemplateMismatch};

use crate::domain::record::{DEFAULT_LOG_TYPE, FIELD_AWS_REGION, FIELD_S3_KEY, FIELD_TYPE};
use crate::domain::{EnrichedRecord, LogUnit};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FieldEnricher {
    log_type: String,
    template: Option<PathFieldTemplate>,
}

impl Default for FieldEnricher {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TYPE, None)
    }
}

impl FieldEnricher {
    pub fn new(log_type: impl Into<String>, template: Option<PathFieldTemplate>) -> Self {
        let log_type = log_type.into();
        Self {
            log_type: if log_type.is_empty() {
                DEFAULT_LOG_TYPE.to_string()
            } else {
                log_type
            },
            template: template.filter(|t| !t.is_empty()),
        }
    }

    pub fn log_type(&self) -> &str {
        &self.log_type
    }

    /// Resolve the fields shared by every record of one object.
    ///
    /// A template that does not line up with the key is skipped as a whole,
    /// with a single warning for the object.
    pub fn for_object(&self, bucket: &str, key: &str, region: &str) -> ObjectEnricher {
        let mut shared = Vec::new();
        let mut template_mismatch = None;

        if let Some(template) = &self.template {
            match template.apply(key) {
                Ok(fields) => {
                    debug!(key, count = fields.len(), "Adding path fields to logs");
                    shared.extend(
                        fields
                            .into_iter()
                            .map(|(name, value)| (name.to_string(), value.to_string())),
                    );
                }
                Err(mismatch) => {
                    warn!(
                        key,
                        template_len = mismatch.template_len,
                        segment_count = mismatch.segment_count,
                        "Path template does not match the object key, skipping path fields"
                    );
                    template_mismatch = Some(mismatch);
                }
            }
        }

        shared.push((FIELD_TYPE.to_string(), self.log_type.clone()));
        shared.push((FIELD_S3_KEY.to_string(), format!("{bucket}/{key}")));
        shared.push((FIELD_AWS_REGION.to_string(), region.to_string()));

        ObjectEnricher {
            shared,
            template_mismatch,
        }
    }

    /// Enrich a single unit.
    pub fn enrich(&self, unit: LogUnit, bucket: &str, key: &str, region: &str) -> EnrichedRecord {
        self.for_object(bucket, key, region).enrich(unit)
    }
}

/// Enricher bound to one object.
#[derive(Debug, Clone)]
pub struct ObjectEnricher {
    // Applied in order; provenance comes last so it overrides record content.
    shared: Vec<(String, String)>,
    template_mismatch: Option<TemplateMismatch>,
}

impl ObjectEnricher {
    pub fn enrich(&self, unit: LogUnit) -> EnrichedRecord {
        let mut record = EnrichedRecord::from(unit);
        for (name, value) in &self.shared {
            record.insert(name.as_str(), value.as_str());
        }
        record
    }

    pub fn template_mismatch(&self) -> Option<&TemplateMismatch> {
        self.template_mismatch.as_ref()
    }
}
