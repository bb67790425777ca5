use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FEDERATED_ALGORITHM, DEFAULT_KEY_FETCH_TIMEOUT_SECS,
    MAX_KEY_FETCH_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Algorithms a federated token may be signed with. Symmetric algorithms are
/// never accepted for the federated issuer.
const ASYMMETRIC_ALGORITHMS: &[&str] = &[
    "RS256", "RS384", "RS512", "PS256", "PS384", "PS512", "ES256", "ES384", "EdDSA",
];

/// Third-party identity provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FederatedConfig {
    pub enabled: bool,
    /// Provider domain, e.g. "tenant.eu.auth0.com"
    pub domain: Option<String>,
    /// Overrides the issuer derived from `domain`
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Overrides the signing-key directory URL derived from `domain`
    pub jwks_uri: Option<String>,
    pub key_fetch_timeout_secs: u64,
    pub algorithms: Vec<String>,
}

impl Default for FederatedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            domain: None,
            issuer: None,
            audience: None,
            jwks_uri: None,
            key_fetch_timeout_secs: DEFAULT_KEY_FETCH_TIMEOUT_SECS,
            algorithms: vec![String::from(DEFAULT_FEDERATED_ALGORITHM)],
        }
    }
}

impl FederatedConfig {
    /// Trusted issuer: explicit override, else `https://{domain}/`
    pub fn trusted_issuer(&self) -> Option<String> {
        self.issuer
            .clone()
            .or_else(|| self.domain.as_ref().map(|d| format!("https://{}/", d)))
    }

    /// Signing-key directory URL: explicit override, else the well-known path
    pub fn key_directory_uri(&self) -> Option<String> {
        self.jwks_uri.clone().or_else(|| {
            self.domain
                .as_ref()
                .map(|d| format!("https://{}/.well-known/jwks.json", d))
        })
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let issuer = self.trusted_issuer().ok_or_else(|| {
            ConfigError::federated("auth.federated requires either domain or issuer when enabled")
        })?;

        if !(issuer.starts_with("https://") || issuer.starts_with("http://")) {
            return Err(ConfigError::federated(format!(
                "auth.federated issuer must be an absolute URL (scheme + host), got '{}'",
                issuer
            )));
        }

        if self.key_directory_uri().is_none() {
            return Err(ConfigError::federated(
                "auth.federated requires either domain or jwks_uri when enabled",
            ));
        }

        if self.key_fetch_timeout_secs == 0 || self.key_fetch_timeout_secs > MAX_KEY_FETCH_TIMEOUT_SECS
        {
            return Err(ConfigError::federated(format!(
                "auth.federated.key_fetch_timeout_secs must be 1-{}, got {}",
                MAX_KEY_FETCH_TIMEOUT_SECS, self.key_fetch_timeout_secs
            )));
        }

        if self.algorithms.is_empty() {
            return Err(ConfigError::federated(
                "auth.federated.algorithms must list at least one algorithm",
            ));
        }

        if let Some(bad) = self
            .algorithms
            .iter()
            .find(|alg| !ASYMMETRIC_ALGORITHMS.contains(&alg.as_str()))
        {
            return Err(ConfigError::federated(format!(
                "auth.federated.algorithms only accepts asymmetric algorithms, got '{}'",
                bad
            )));
        }

        Ok(())
    }
}
