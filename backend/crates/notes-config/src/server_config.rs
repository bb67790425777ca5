use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS, MIN_PORT,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix for every REST route, e.g. "/api"
    pub base_path: String,
    /// Per-request timeout applied by the router
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            base_path: String::from(DEFAULT_BASE_PATH),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 lets the OS pick a free port
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if !self.base_path.starts_with('/') || self.base_path.len() < 2 {
            return Err(ConfigError::server(format!(
                "server.base_path must start with '/' and name a prefix, got '{}'",
                self.base_path
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::server(
                "server.request_timeout_secs must be at least 1",
            ));
        }

        Ok(())
    }
}
