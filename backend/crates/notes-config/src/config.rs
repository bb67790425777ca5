use crate::{
    AuthConfig, CONFIG_DIR_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR, DatabaseConfig,
    LoggingConfig, ServerConfig, ValidationConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. NOTES_CONFIG_DIR env var, else ./.notes/
    /// 2. Auto-create the config directory if it doesn't exist
    /// 3. config.toml if present, else defaults
    /// 4. NOTES_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)
                .map_err(|e| ConfigError::io(config_dir.clone(), e))?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path.to_path_buf(), e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::toml(path.to_path_buf(), e))
    }

    /// Priority: NOTES_CONFIG_DIR env var > ./.notes/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::general("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.validation.validate()?;
        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };
        let config_dir = Self::config_dir()?;
        Ok(Some(config_dir.join(&self.logging.dir).join(file)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (base path {}, timeout {}s)",
            self.server.host,
            self.server.port,
            self.server.base_path,
            self.server.request_timeout_secs
        );
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  auth: local HS256, argon2 t={} m={}KiB",
            self.auth.password_iterations, self.auth.password_memory_kib
        );

        let federated = &self.auth.federated;
        if federated.enabled {
            info!(
                "  federated: issuer={} audience={} algorithms={:?} key_timeout={}s",
                federated.trusted_issuer().unwrap_or_default(),
                federated.audience.as_deref().unwrap_or("<none>"),
                federated.algorithms,
                federated.key_fetch_timeout_secs
            );
        } else {
            info!("  federated: disabled");
        }

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  validation: title={}..{}, name<={}, password>={}",
            self.validation.min_title_length,
            self.validation.max_title_length,
            self.validation.max_name_length,
            self.validation.min_password_length
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("NOTES_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("NOTES_SERVER_PORT", &mut self.server.port);
        Self::apply_env_string("NOTES_SERVER_BASE_PATH", &mut self.server.base_path);
        Self::apply_env_parse(
            "NOTES_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );

        // Database
        Self::apply_env_string("NOTES_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "NOTES_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("NOTES_AUTH_TOKEN_SECRET", &mut self.auth.token_secret);
        Self::apply_env_parse(
            "NOTES_AUTH_PASSWORD_ITERATIONS",
            &mut self.auth.password_iterations,
        );
        Self::apply_env_parse(
            "NOTES_AUTH_PASSWORD_MEMORY_KIB",
            &mut self.auth.password_memory_kib,
        );

        // Federated identity provider
        let federated = &mut self.auth.federated;
        Self::apply_env_bool("NOTES_FEDERATED_ENABLED", &mut federated.enabled);
        Self::apply_env_option_string("NOTES_FEDERATED_DOMAIN", &mut federated.domain);
        Self::apply_env_option_string("NOTES_FEDERATED_ISSUER", &mut federated.issuer);
        Self::apply_env_option_string("NOTES_FEDERATED_AUDIENCE", &mut federated.audience);
        Self::apply_env_option_string("NOTES_FEDERATED_JWKS_URI", &mut federated.jwks_uri);
        Self::apply_env_parse(
            "NOTES_FEDERATED_KEY_FETCH_TIMEOUT_SECS",
            &mut federated.key_fetch_timeout_secs,
        );
        Self::apply_env_list("NOTES_FEDERATED_ALGORITHMS", &mut federated.algorithms);

        // Logging
        Self::apply_env_parse("NOTES_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("NOTES_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("NOTES_LOG_FILE", &mut self.logging.file);

        // Validation
        Self::apply_env_parse(
            "NOTES_VALIDATION_MIN_TITLE_LENGTH",
            &mut self.validation.min_title_length,
        );
        Self::apply_env_parse(
            "NOTES_VALIDATION_MAX_TITLE_LENGTH",
            &mut self.validation.max_title_length,
        );
        Self::apply_env_parse(
            "NOTES_VALIDATION_MAX_NAME_LENGTH",
            &mut self.validation.max_name_length,
        );
        Self::apply_env_parse(
            "NOTES_VALIDATION_MIN_PASSWORD_LENGTH",
            &mut self.validation.min_password_length,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Comma-separated list, blanks dropped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
