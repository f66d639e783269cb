use super::config::{LogLevel, LogOutputFormat};
use clap::ValueEnum;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid directive format '{input}'. Expected: 'target=level'")]
    InvalidDirectiveFormat { input: String },

    #[error("Invalid log level '{level}' in directive '{input}'")]
    InvalidLogLevel { input: String, level: String },

    #[error("Logging system initialization failed: {details}")]
    InitFailed { details: String },
}

/// A `target=level` filter directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    target: String,
    level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn parse(input: &str) -> Result<Self, LoggingError> {
        let Some((target, level)) = input.split_once('=') else {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: input.to_string(),
            });
        };
        let target = target.trim();
        if target.is_empty() {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: input.to_string(),
            });
        }

        let level = LogLevel::from_str(level.trim(), true).map_err(|_| {
            LoggingError::InvalidLogLevel {
                input: input.to_string(),
                level: level.to_string(),
            }
        })?;

        Ok(Self::new(target, level))
    }

    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.target, self.level.as_str())
    }
}

/// Builds the global tracing subscriber.
pub struct LoggingSystem {
    directives: Vec<LogDirective>,
    format: LogOutputFormat,
}

impl LoggingSystem {
    pub fn new(format: LogOutputFormat) -> Self {
        Self {
            directives: Vec::new(),
            format,
        }
    }

    /// Add a directive. Malformed ones are reported and skipped.
    pub fn add_directive(&mut self, directive: &str) -> Result<(), LoggingError> {
        let directive = LogDirective::parse(directive)?;
        self.directives.push(directive);
        Ok(())
    }

    /// Quiet dependencies that would otherwise drown the hook's own events.
    pub fn add_default_directives(&mut self) {
        for target in ["tokio", "runtime", "mio"] {
            self.directives.push(LogDirective::new(target, LogLevel::Warn));
        }
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let mut parts = Vec::with_capacity(self.directives.len() + 1);
        parts.push(default_level.as_str().to_string());
        parts.extend(self.directives.iter().map(LogDirective::to_filter_string));
        parts.join(",")
    }

    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    pub fn initialize_tracing(&self, default_level: LogLevel) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string(default_level);
        let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
            details: format!("Failed to create EnvFilter with '{filter_string}': {e}"),
        })?;

        let registry = tracing_subscriber::registry().with(env_filter);
        let result = match self.format {
            LogOutputFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(false)
                        .with_writer(std::io::stderr),
                )
                .try_init(),
            LogOutputFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .try_init(),
        };

        result.map_err(|e| LoggingError::InitFailed {
            details: format!("Failed to set global tracing subscriber: {e}"),
        })
    }
}

/// Install the global subscriber once per process.
///
/// Diagnostics go to stderr so stdout stays clean for NDJSON output.
/// Later calls return the outcome of the first one.
pub fn init_logging(level: LogLevel, format: LogOutputFormat) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), LoggingError>> = OnceLock::new();

    INIT.get_or_init(|| {
        let mut logging_system = LoggingSystem::new(format);
        logging_system.add_default_directives();
        logging_system.initialize_tracing(level)
    })
    .clone()
}
