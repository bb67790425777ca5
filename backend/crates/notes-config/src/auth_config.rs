use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PASSWORD_ITERATIONS, DEFAULT_PASSWORD_MEMORY_KIB,
    FederatedConfig, MAX_PASSWORD_ITERATIONS, MIN_PASSWORD_ITERATIONS, MIN_PASSWORD_MEMORY_KIB,
    MIN_TOKEN_SECRET_LENGTH,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for self-issued tokens
    pub token_secret: Option<String>,
    /// Argon2 time cost
    pub password_iterations: u32,
    /// Argon2 memory cost in KiB
    pub password_memory_kib: u32,
    pub federated: FederatedConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            password_iterations: DEFAULT_PASSWORD_ITERATIONS,
            password_memory_kib: DEFAULT_PASSWORD_MEMORY_KIB,
            federated: FederatedConfig::default(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.token_secret.as_deref() {
            None => {
                return Err(ConfigError::auth(
                    "auth.token_secret is required (set NOTES_AUTH_TOKEN_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_TOKEN_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.token_secret must be at least {} characters",
                    MIN_TOKEN_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if self.password_iterations < MIN_PASSWORD_ITERATIONS
            || self.password_iterations > MAX_PASSWORD_ITERATIONS
        {
            return Err(ConfigError::auth(format!(
                "auth.password_iterations must be {}-{}, got {}",
                MIN_PASSWORD_ITERATIONS, MAX_PASSWORD_ITERATIONS, self.password_iterations
            )));
        }

        if self.password_memory_kib < MIN_PASSWORD_MEMORY_KIB {
            return Err(ConfigError::auth(format!(
                "auth.password_memory_kib must be at least {}, got {}",
                MIN_PASSWORD_MEMORY_KIB, self.password_memory_kib
            )));
        }

        self.federated.validate()
    }
}
