use crate::collector::ObjectSource;
use crate::domain::{S3Event, decode_object_key};
use crate::filter::FilterError;
use crate::pipeline::{LogPipeline, PipelineConfig};
use crate::sender::LogSink;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] FilterError),
    #[error("Invalid notification payload: {0}")]
    Event(#[from] serde_json::Error),
}

/// Outcome of one notification batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub objects_seen: usize,
    pub objects_skipped: usize,
    pub objects_failed: usize,
    pub records_emitted: usize,
    pub records_dropped: usize,
}

/// Drives every object of a notification through fetch, pipeline and sink.
pub struct EventHandler<S, K> {
    pipeline: Result<LogPipeline, FilterError>,
    source: S,
    sink: K,
}

impl<S, K> EventHandler<S, K>
where
    S: ObjectSource,
    K: LogSink,
{
    /// An invalid configuration is reported by [`EventHandler::handle`],
    /// before anything is fetched.
    pub fn new(config: &PipelineConfig, source: S, sink: K) -> Self {
        Self {
            pipeline: LogPipeline::new(config),
            source,
            sink,
        }
    }

    pub fn with_pipeline(pipeline: LogPipeline, source: S, sink: K) -> Self {
        Self {
            pipeline: Ok(pipeline),
            source,
            sink,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    pub async fn handle_payload(&self, payload: &[u8]) -> Result<BatchSummary, HandlerError> {
        let event = S3Event::from_slice(payload)?;
        self.handle(&event).await
    }

    pub async fn handle(&self, event: &S3Event) -> Result<BatchSummary, HandlerError> {
        let pipeline = self.pipeline.as_ref().map_err(|e| {
            error!(error = %e, "Refusing to process batch");
            HandlerError::Config(e.clone())
        })?;

        let mut summary = BatchSummary::default();

        for record in &event.records {
            summary.objects_seen += 1;
            let bucket = record.bucket();
            let key = decode_object_key(record.raw_key());
            let region = record.aws_region.as_str();

            if !pipeline.should_process(&key) {
                summary.objects_skipped += 1;
                continue;
            }

            let object = match self.source.fetch(bucket, &key, region).await {
                Ok(object) => object,
                Err(e) => {
                    error!(bucket, key = %key, error = %e, "Error occurred while getting object");
                    summary.objects_failed += 1;
                    continue;
                }
            };

            let processed = pipeline.process(&object);
            summary.records_dropped += processed.stats.records_dropped;

            if processed.records.is_empty() {
                debug!(bucket, key = %key, "Object produced no records");
                continue;
            }

            match self.sink.send(processed.records).await {
                Ok(sent) => summary.records_emitted += sent,
                Err(e) => {
                    error!(bucket, key = %key, error = %e, "Error occurred while sending logs");
                    summary.objects_failed += 1;
                }
            }
        }

        info!(
            objects_seen = summary.objects_seen,
            objects_skipped = summary.objects_skipped,
            objects_failed = summary.objects_failed,
            records_emitted = summary.records_emitted,
            records_dropped = summary.records_dropped,
            "Batch processed"
        );
        Ok(summary)
    }
}
