use thiserror::Error;

/// Top-level error type for the hook.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event error: {0}")]
    Event(String),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<crate::filter::FilterError> for HookError {
    fn from(err: crate::filter::FilterError) -> Self {
        HookError::Config(err.to_string())
    }
}

impl From<crate::app::ConfigError> for HookError {
    fn from(err: crate::app::ConfigError) -> Self {
        HookError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        HookError::Event(err.to_string())
    }
}
