//! Wires configuration into the long-lived auth components.
//!
//! Everything here is built exactly once per process and shared by `Arc`;
//! in particular the signing-key directory (and its cache) belongs to the
//! single `Authenticator` instance.

use crate::AppState;
use crate::error::Result as ServerErrorResult;

use notes_auth::{
    AccountService, AuthError, Authenticator, CredentialVerifier, FederatedVerifier,
    FederatedVerifierConfig, LocalTokenIssuer, PasswordHasherConfig, SigningKeyDirectory,
};
use notes_config::{AuthConfig, Config, FederatedConfig};
use notes_db::{UserRepository, UserStore};

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use log::{info, warn};
use sqlx::SqlitePool;

/// Build the application state. Expects a validated config.
pub fn build_state(config: &Config, pool: SqlitePool) -> ServerErrorResult<AppState> {
    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));

    let secret = config
        .auth
        .token_secret
        .as_deref()
        .ok_or_else(|| AuthError::configuration("auth.token_secret is not set"))?;
    let tokens = Arc::new(LocalTokenIssuer::new(secret.as_bytes()));

    let passwords = credential_verifier(&config.auth)?;
    let federated = federated_verifier(&config.auth.federated)?;

    let authenticator = Arc::new(Authenticator::new(tokens.clone(), federated, users.clone()));
    let accounts = Arc::new(AccountService::new(users, passwords, tokens));

    Ok(AppState {
        pool,
        authenticator,
        accounts,
        validation: config.validation.clone(),
    })
}

fn credential_verifier(auth: &AuthConfig) -> ServerErrorResult<CredentialVerifier> {
    Ok(CredentialVerifier::new(PasswordHasherConfig {
        iterations: auth.password_iterations,
        memory_kib: auth.password_memory_kib,
    })?)
}

/// `None` when federated sign-in is disabled.
pub fn federated_verifier(config: &FederatedConfig) -> ServerErrorResult<Option<FederatedVerifier>> {
    if !config.enabled {
        warn!("Federated sign-in DISABLED - only local tokens are accepted");
        return Ok(None);
    }

    let issuer = config
        .trusted_issuer()
        .ok_or_else(|| AuthError::configuration("federated issuer is not configured"))?;
    let jwks_uri = config
        .key_directory_uri()
        .ok_or_else(|| AuthError::configuration("federated key directory is not configured"))?;

    let algorithms = config
        .algorithms
        .iter()
        .map(|name| {
            Algorithm::from_str(name).map_err(|_| {
                AuthError::configuration(format!("Unknown signing algorithm '{}'", name))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let directory = SigningKeyDirectory::new(
        jwks_uri.clone(),
        Duration::from_secs(config.key_fetch_timeout_secs),
    )?;

    let verifier = FederatedVerifier::new(
        FederatedVerifierConfig {
            issuer: issuer.clone(),
            audience: config.audience.clone(),
            algorithms,
        },
        directory,
    )?;

    info!("Federated sign-in enabled: issuer={} keys={}", issuer, jwks_uri);
    Ok(Some(verifier))
}
