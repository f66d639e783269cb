use super::ConfigError;
use clap::ValueEnum;
use std::path::PathBuf;

/// Parse an environment variable into `target`, keeping the default when unset.
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

/// Case-insensitive parse of a `ValueEnum` environment variable.
pub fn load_env_enum<T: ValueEnum>(name: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(name) {
        *target = T::from_str(&value, true)
            .map_err(|_| ConfigError::EnvError(format!("Invalid {name}: {value}")))?;
    }
    Ok(())
}

/// Load an optional string. Empty values count as unset.
pub fn load_env_string_opt(name: &str, target: &mut Option<String>) {
    if let Ok(value) = std::env::var(name)
        && !value.is_empty()
    {
        *target = Some(value);
    }
}

/// Load a string. Empty values keep the default.
pub fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name)
        && !value.is_empty()
    {
        *target = value;
    }
}

pub fn load_env_path(name: &str, target: &mut PathBuf) {
    if let Ok(value) = std::env::var(name) {
        *target = PathBuf::from(value);
    }
}

pub fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}
