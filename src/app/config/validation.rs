use super::{Config, ConfigError};

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.include_patterns().is_empty() && !self.exclude_patterns().is_empty() {
            return Err(ConfigError::MutuallyExclusiveFilters);
        }

        if self.max_record_bytes == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Max record bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
