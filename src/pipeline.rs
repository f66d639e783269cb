//! Object processing pipeline: decode, extract, enrich, serialize.

use crate::decode::{self, Encoding};
use crate::domain::RawObject;
use crate::domain::record::DEFAULT_LOG_TYPE;
use crate::enrich::{FieldEnricher, PathFieldTemplate};
use crate::filter::{FilterDecision, FilterError, PathFilter};
use crate::parser::{self, LogFormat};
use crate::sender::RecordSerializer;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub log_type: String,
    pub path_field_template: Option<String>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_record_bytes: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_type: DEFAULT_LOG_TYPE.to_string(),
            path_field_template: None,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            max_record_bytes: None,
        }
    }
}

/// Counters for one processed object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub units_extracted: usize,
    pub degraded_units: usize,
    pub records_emitted: usize,
    pub records_dropped: usize,
    pub template_mismatches: usize,
}

#[derive(Debug, Clone)]
pub struct ProcessedObject {
    /// Serialized records, in extraction order.
    pub records: Vec<Vec<u8>>,
    pub encoding: Encoding,
    pub format: LogFormat,
    pub stats: ProcessingStats,
}

pub struct LogPipeline {
    filter: Option<PathFilter>,
    enricher: FieldEnricher,
    serializer: RecordSerializer,
}

impl LogPipeline {
    /// Fails when both include and exclude patterns are configured.
    pub fn new(config: &PipelineConfig) -> Result<Self, FilterError> {
        let filter = PathFilter::from_lists(&config.include_patterns, &config.exclude_patterns)?;
        let template = config
            .path_field_template
            .as_deref()
            .and_then(PathFieldTemplate::parse);

        let mut serializer = RecordSerializer::new();
        if let Some(limit) = config.max_record_bytes {
            serializer = serializer.with_max_record_bytes(limit);
        }

        Ok(Self {
            filter,
            enricher: FieldEnricher::new(config.log_type.clone(), template),
            serializer,
        })
    }

    pub fn filter(&self) -> Option<&PathFilter> {
        self.filter.as_ref()
    }

    /// Whether an object with this key should be fetched at all.
    pub fn should_process(&self, key: &str) -> bool {
        match &self.filter {
            Some(filter) => filter.evaluate(key) == FilterDecision::Process,
            None => true,
        }
    }

    pub fn process(&self, object: &RawObject) -> ProcessedObject {
        let decoded = decode::decode_with_hint(&object.bytes, object.content_type.as_deref());
        let extraction = parser::extract_detailed(&object.key, &decoded.text);
        let enricher = self
            .enricher
            .for_object(&object.bucket, &object.key, &object.region);

        let mut stats = ProcessingStats {
            units_extracted: extraction.units.len(),
            degraded_units: extraction.degraded_lines,
            template_mismatches: usize::from(enricher.template_mismatch().is_some()),
            ..ProcessingStats::default()
        };

        let mut records = Vec::with_capacity(extraction.units.len());
        for unit in extraction.units {
            let record = enricher.enrich(unit);
            match self.serializer.serialize_or_drop(&record) {
                Some(encoded) => records.push(encoded),
                None => stats.records_dropped += 1,
            }
        }
        stats.records_emitted = records.len();

        if stats.records_dropped > 0 {
            info!(
                key = %object.key,
                dropped = stats.records_dropped,
                "Some records could not be serialized"
            );
        }
        debug!(
            bucket = %object.bucket,
            key = %object.key,
            encoding = ?decoded.encoding,
            format = ?extraction.format,
            emitted = stats.records_emitted,
            "Processed object"
        );

        ProcessedObject {
            records,
            encoding: decoded.encoding,
            format: extraction.format,
            stats,
        }
    }
}
