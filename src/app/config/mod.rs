mod cli;
mod env;
mod validation;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Include and exclude path regexes are mutually exclusive, configure only one of them")]
    MutuallyExclusiveFilters,
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name, never failing.
    ///
    /// `panic` and `fatal` map to `error`, `warning` to `warn`. Unknown names
    /// fall back to `info` with a warning on stderr, since logging is not up yet.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "panic" | "fatal" | "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            other => {
                eprintln!("Warning: unknown log level '{other}', using info");
                LogLevel::Info
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<String> for LogLevel {
    fn from(value: String) -> Self {
        LogLevel::parse_lenient(&value)
    }
}

/// clap value parser for `--log-level`/`LOG_LEVEL`.
pub(crate) fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    Ok(LogLevel::parse_lenient(value))
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Output style of the hook's own diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutputFormat {
    /// One JSON object per event (default)
    #[default]
    Json,
    /// Human readable, for local runs
    Pretty,
}

pub use cli::Config;

/// Split a comma-separated regex list. Spaces are removed and empty items dropped.
pub fn split_patterns(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.replace(' ', "")
            .split(',')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_patterns() {
        assert_eq!(
            split_patterns(Some(r"^logs/, \.gz$ ,,tmp")),
            vec!["^logs/".to_string(), r"\.gz$".to_string(), "tmp".to_string()]
        );
        assert!(split_patterns(Some("")).is_empty());
        assert!(split_patterns(Some(" , ")).is_empty());
        assert!(split_patterns(None).is_empty());
    }

    #[test]
    fn test_log_level_falls_back_to_info() {
        assert_eq!(LogLevel::parse_lenient("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::parse_lenient("warning"), LogLevel::Warn);
        assert_eq!(LogLevel::parse_lenient("fatal"), LogLevel::Error);
        assert_eq!(LogLevel::parse_lenient("panic"), LogLevel::Error);
        assert_eq!(LogLevel::parse_lenient("verbose"), LogLevel::Info);
        assert_eq!(parse_log_level("nonsense"), Ok(LogLevel::Info));
    }

    #[test]
    fn test_log_level_from_toml_is_lenient() {
        #[derive(Deserialize)]
        struct Levels {
            a: LogLevel,
            b: LogLevel,
        }

        let levels: Levels = toml::from_str("a = \"fatal\"\nb = \"loud\"").unwrap();
        assert_eq!(levels.a, LogLevel::Error);
        assert_eq!(levels.b, LogLevel::Info);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
