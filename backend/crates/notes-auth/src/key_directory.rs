//! Signing-key directory client with a process-wide, per-kid cache.
//!
//! Keys are fetched on a cache miss and on an explicit `refresh`. A
//! successful refresh replaces the whole cache with the published set, so a
//! kid the directory stopped publishing is no longer trusted. Failed fetches
//! are not cached and leave the current keys in place.

use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use log::{debug, info, warn};
use tokio::sync::RwLock;

/// Where a key handed out by [`SigningKeyDirectory::key`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Cached,
    Fetched,
}

pub struct SigningKeyDirectory {
    client: reqwest::Client,
    jwks_uri: String,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl SigningKeyDirectory {
    /// `fetch_timeout` bounds the whole request; a hung directory fails closed.
    #[track_caller]
    pub fn new(jwks_uri: impl Into<String>, fetch_timeout: Duration) -> AuthErrorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| AuthError::Configuration {
                message: format!("Cannot build key directory client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            jwks_uri: jwks_uri.into(),
            keys: RwLock::new(HashMap::new()),
        })
    }

    pub fn jwks_uri(&self) -> &str {
        &self.jwks_uri
    }

    /// Key for `kid`, fetching the directory on a miss.
    pub async fn key(&self, kid: &str) -> AuthErrorResult<(DecodingKey, KeySource)> {
        if let Some(key) = self.cached(kid).await {
            return Ok((key, KeySource::Cached));
        }

        debug!("Signing key '{}' not cached, fetching {}", kid, self.jwks_uri);
        self.refresh().await?;

        self.cached(kid)
            .await
            .map(|key| (key, KeySource::Fetched))
            .ok_or_else(|| AuthError::key_lookup(format!("no signing key with kid '{}'", kid)))
    }

    /// Cache lookup only, never touches the network.
    pub async fn cached(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.read().await.get(kid).cloned()
    }

    /// Re-fetch the directory and swap the cache for every usable key it
    /// publishes. Returns the number of keys stored.
    pub async fn refresh(&self) -> AuthErrorResult<usize> {
        let response = self
            .client
            .get(&self.jwks_uri)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::key_lookup(format!("timed out fetching {}", self.jwks_uri))
                } else {
                    AuthError::key_lookup(format!("cannot reach {}: {}", self.jwks_uri, e))
                }
            })?
            .error_for_status()
            .map_err(|e| AuthError::key_lookup(format!("directory responded with {}", e)))?;

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::key_lookup(format!("malformed key set: {}", e)))?;

        let mut fresh = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                debug!("Skipping signing key without kid");
                continue;
            };

            // Shared secrets never verify a federated token
            if matches!(jwk.algorithm, AlgorithmParameters::OctetKey(_)) {
                warn!("Skipping symmetric key '{}' published by {}", kid, self.jwks_uri);
                continue;
            }

            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    fresh.insert(kid, key);
                }
                Err(e) => warn!("Skipping unusable signing key '{}': {}", kid, e),
            }
        }

        let count = fresh.len();

        let mut keys = self.keys.write().await;
        let withdrawn = keys.keys().filter(|kid| !fresh.contains_key(*kid)).count();
        *keys = fresh;

        if withdrawn > 0 {
            info!("Dropped {} signing key(s) no longer published by {}", withdrawn, self.jwks_uri);
        }
        info!("Loaded {} signing key(s) from {}", count, self.jwks_uri);

        Ok(count)
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }
}

impl std::fmt::Debug for SigningKeyDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyDirectory")
            .field("jwks_uri", &self.jwks_uri)
            .finish_non_exhaustive()
    }
}
