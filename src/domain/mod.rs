//! Domain layer for s3-log-hook.
//!
//! Contains the canonical types shared across all modules:
//! - `RawObject`: an object's identity and raw payload as handed over by a source
//! - `LogUnit`: one extracted entry, structured or plain text
//! - `EnrichedRecord`: the pipeline's output record before serialization
//! - `S3Event`: the object-created notification that drives a batch
//! - `HookError`: Top-level error type

pub mod error;
pub mod event;
pub mod log_unit;
pub mod object;
pub mod record;

pub use error::HookError;
pub use event::{S3Event, S3EventRecord, decode_object_key};
pub use log_unit::{JsonMap, LogUnit};
pub use object::RawObject;
pub use record::EnrichedRecord;
