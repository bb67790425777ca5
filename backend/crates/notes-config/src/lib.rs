mod auth_config;
mod config;
mod database_config;
mod error;
mod federated_config;
mod log_level;
mod logging_config;
mod server_config;
mod validation_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult, ConfigSection};
pub use federated_config::FederatedConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use validation_config::ValidationConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "NOTES_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".notes";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_BASE_PATH: &str = "/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATABASE_FILENAME: &str = "notes.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const DEFAULT_PASSWORD_ITERATIONS: u32 = 2;
const MIN_PASSWORD_ITERATIONS: u32 = 1;
const MAX_PASSWORD_ITERATIONS: u32 = 10;
const DEFAULT_PASSWORD_MEMORY_KIB: u32 = 19456;
const MIN_PASSWORD_MEMORY_KIB: u32 = 8;

const DEFAULT_KEY_FETCH_TIMEOUT_SECS: u64 = 5;
const MAX_KEY_FETCH_TIMEOUT_SECS: u64 = 60;
const DEFAULT_FEDERATED_ALGORITHM: &str = "RS256";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
