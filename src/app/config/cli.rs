use super::env::{
    load_env_enum, load_env_path, load_env_path_opt, load_env_string, load_env_string_opt,
    load_env_var,
};
use super::{ConfigError, LogLevel, LogOutputFormat, parse_log_level, split_patterns};
use crate::domain::record::DEFAULT_LOG_TYPE;
use crate::pipeline::PipelineConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(name = "s3-log-hook", author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Value of the `type` field on every record
    #[arg(long, env = "LOG_TYPE", default_value = DEFAULT_LOG_TYPE)]
    pub log_type: String,

    /// `/`-delimited field names mapped onto object key segments
    #[arg(long, env = "PATH_TO_FIELDS")]
    pub path_to_fields: Option<String>,

    /// Comma-separated regexes; only matching keys are processed
    #[arg(long, env = "INCLUDE_PATHS_REGEXES")]
    pub include_paths_regexes: Option<String>,

    /// Comma-separated regexes; matching keys are skipped
    #[arg(long, env = "EXCLUDE_PATHS_REGEXES")]
    pub exclude_paths_regexes: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info", value_parser = parse_log_level)]
    pub log_level: LogLevel,

    /// Diagnostic log format
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    pub log_format: LogOutputFormat,

    /// Directory holding `<bucket>/<key>` objects
    #[arg(long, env = "LOCAL_ROOT", default_value = ".")]
    pub local_root: PathBuf,

    /// NDJSON output file (stdout when unset)
    #[arg(long, env = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Drop records whose JSON encoding is larger than this
    #[arg(long, env = "MAX_RECORD_BYTES")]
    pub max_record_bytes: Option<usize>,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Notification JSON file, `-` for stdin
    #[arg(value_name = "EVENT_FILE", default_value = "-")]
    #[serde(skip)]
    pub event_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_type: DEFAULT_LOG_TYPE.to_string(),
            path_to_fields: None,
            include_paths_regexes: None,
            exclude_paths_regexes: None,
            log_level: LogLevel::Info,
            log_format: LogOutputFormat::Json,
            local_root: PathBuf::from("."),
            output: None,
            max_record_bytes: None,
            config_file: None,
            event_file: PathBuf::from("-"),
        }
    }
}

impl Config {
    /// Parse CLI arguments (with environment fallbacks). When a config file is
    /// named, its contents replace everything except the event file.
    pub fn from_args_and_env<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::try_parse_from(args)?;

        let config = match &config.config_file {
            Some(path) => Config {
                event_file: config.event_file.clone(),
                config_file: Some(path.clone()),
                ..Self::from_file(path)?
            },
            None => config,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        load_env_string("LOG_TYPE", &mut config.log_type);
        load_env_string_opt("PATH_TO_FIELDS", &mut config.path_to_fields);
        load_env_string_opt("INCLUDE_PATHS_REGEXES", &mut config.include_paths_regexes);
        load_env_string_opt("EXCLUDE_PATHS_REGEXES", &mut config.exclude_paths_regexes);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = LogLevel::parse_lenient(&level);
        }
        load_env_enum("LOG_FORMAT", &mut config.log_format)?;
        load_env_path("LOCAL_ROOT", &mut config.local_root);
        load_env_path_opt("OUTPUT", &mut config.output);
        load_env_path_opt("CONFIG_FILE", &mut config.config_file);

        if std::env::var("MAX_RECORD_BYTES").is_ok() {
            let mut limit = 0usize;
            load_env_var("MAX_RECORD_BYTES", &mut limit)?;
            config.max_record_bytes = Some(limit);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn include_patterns(&self) -> Vec<String> {
        split_patterns(self.include_paths_regexes.as_deref())
    }

    pub fn exclude_patterns(&self) -> Vec<String> {
        split_patterns(self.exclude_paths_regexes.as_deref())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            log_type: if self.log_type.is_empty() {
                DEFAULT_LOG_TYPE.to_string()
            } else {
                self.log_type.clone()
            },
            path_field_template: self
                .path_to_fields
                .clone()
                .filter(|template| !template.trim().is_empty()),
            include_patterns: self.include_patterns(),
            exclude_patterns: self.exclude_patterns(),
            max_record_bytes: self.max_record_bytes,
        }
    }
}
