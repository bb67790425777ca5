use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const DEFAULT_MIN_TITLE_LENGTH: usize = 1;
pub const DEFAULT_MAX_TITLE_LENGTH: usize = 128;
pub const MAX_TITLE_LENGTH: usize = 512;

pub const DEFAULT_MAX_NAME_LENGTH: usize = 64;
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Field limits applied to request bodies before they reach persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_title_length: usize,
    pub max_title_length: usize,
    pub max_name_length: usize,
    pub min_password_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_title_length: DEFAULT_MIN_TITLE_LENGTH,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_title_length == 0
            || self.min_title_length > self.max_title_length
            || self.max_title_length > MAX_TITLE_LENGTH
        {
            return Err(ConfigError::validation(format!(
                "validation title bounds must satisfy 1 <= min <= max <= {}, got {}..{}",
                MAX_TITLE_LENGTH, self.min_title_length, self.max_title_length
            )));
        }

        if self.max_name_length == 0 {
            return Err(ConfigError::validation(
                "validation.max_name_length must be at least 1",
            ));
        }

        if self.min_password_length < MIN_PASSWORD_LENGTH {
            return Err(ConfigError::validation(format!(
                "validation.min_password_length must be at least {}, got {}",
                MIN_PASSWORD_LENGTH, self.min_password_length
            )));
        }

        Ok(())
    }
}
