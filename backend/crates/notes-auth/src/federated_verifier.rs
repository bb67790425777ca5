//! Federated Token Verifier.
//!
//! Order of checks: header, algorithm allow-list, unverified issuer, key id,
//! key lookup, signature plus registered claims. A signature failure against
//! a cached key forces one directory refresh and one retry, which is how a
//! rotated key gets picked up.

use crate::claims::FederatedTokenPayload;
use crate::token_inspection::peek_issuer;
use crate::{AuthError, FederatedClaims, KeySource, Result as AuthErrorResult, SigningKeyDirectory};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use log::{debug, info};

/// Clock skew tolerance in seconds
const LEEWAY_SECS: u64 = 30;

const SYMMETRIC_ALGORITHMS: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Clone)]
pub struct FederatedVerifierConfig {
    /// Compared byte-for-byte with the token's `iss`
    pub issuer: String,
    pub audience: Option<String>,
    /// Asymmetric algorithms only
    pub algorithms: Vec<Algorithm>,
}

#[derive(Debug)]
pub struct FederatedVerifier {
    config: FederatedVerifierConfig,
    keys: SigningKeyDirectory,
}

enum Attempt {
    Verified(FederatedTokenPayload),
    BadSignature,
}

impl FederatedVerifier {
    #[track_caller]
    pub fn new(config: FederatedVerifierConfig, keys: SigningKeyDirectory) -> AuthErrorResult<Self> {
        if config.algorithms.is_empty() {
            return Err(AuthError::configuration("federated algorithm allow-list is empty"));
        }

        if let Some(alg) = config
            .algorithms
            .iter()
            .find(|alg| SYMMETRIC_ALGORITHMS.contains(*alg))
        {
            return Err(AuthError::configuration(format!(
                "symmetric algorithm {:?} cannot verify federated tokens",
                alg
            )));
        }

        Ok(Self { config, keys })
    }

    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    /// Exact match, no normalization of scheme, host or trailing slash
    pub fn is_trusted_issuer(&self, issuer: &str) -> bool {
        issuer == self.config.issuer
    }

    pub fn key_directory(&self) -> &SigningKeyDirectory {
        &self.keys
    }

    pub async fn verify(&self, token: &str) -> AuthErrorResult<FederatedClaims> {
        let header = decode_header(token)
            .map_err(|e| AuthError::invalid_token(format!("unreadable header: {}", e)))?;

        if !self.config.algorithms.contains(&header.alg) {
            return Err(AuthError::invalid_token(format!(
                "algorithm {:?} is not allowed for federated tokens",
                header.alg
            )));
        }

        match peek_issuer(token)? {
            Some(issuer) if self.is_trusted_issuer(&issuer) => {}
            Some(issuer) => {
                return Err(AuthError::UntrustedIssuer {
                    issuer,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            None => return Err(AuthError::invalid_token("token carries no issuer")),
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_token("token header carries no key id"))?;

        let (key, source) = self.keys.key(&kid).await?;

        let payload = match self.attempt(token, &key, header.alg)? {
            Attempt::Verified(payload) => payload,
            Attempt::BadSignature if source == KeySource::Cached => {
                info!("Signature mismatch for cached key '{}', refreshing key directory", kid);
                self.keys.refresh().await?;

                let key = self.keys.cached(&kid).await.ok_or_else(|| {
                    AuthError::invalid_token(format!("signing key '{}' was withdrawn", kid))
                })?;

                match self.attempt(token, &key, header.alg)? {
                    Attempt::Verified(payload) => payload,
                    Attempt::BadSignature => {
                        return Err(AuthError::invalid_token("signature does not match"));
                    }
                }
            }
            Attempt::BadSignature => {
                return Err(AuthError::invalid_token("signature does not match"));
            }
        };

        let email = payload
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| AuthError::invalid_token("token carries no email claim"))?;

        debug!("Federated token verified for subject {}", payload.sub);

        Ok(FederatedClaims {
            subject: payload.sub,
            email,
            name: payload.name,
            picture: payload.picture,
            issuer: payload.iss,
        })
    }

    /// One decode. A bad signature is reported separately so the caller can
    /// decide whether a refresh is worth it.
    #[track_caller]
    fn attempt(
        &self,
        token: &str,
        key: &DecodingKey,
        alg: Algorithm,
    ) -> AuthErrorResult<Attempt> {
        match decode::<FederatedTokenPayload>(token, key, &self.validation(alg)) {
            Ok(data) => Ok(Attempt::Verified(data.claims)),
            Err(e) => match e.kind() {
                ErrorKind::InvalidSignature => Ok(Attempt::BadSignature),
                ErrorKind::ExpiredSignature => Err(AuthError::ExpiredToken {
                    location: ErrorLocation::from(Location::caller()),
                }),
                ErrorKind::InvalidIssuer => Err(AuthError::UntrustedIssuer {
                    issuer: String::from("<mismatch after verification>"),
                    location: ErrorLocation::from(Location::caller()),
                }),
                _ => Err(AuthError::InvalidToken {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }),
            },
        }
    }

    fn validation(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.leeway = LEEWAY_SECS;
        validation.set_issuer(&[&self.config.issuer]);

        match &self.config.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                validation.set_required_spec_claims(&["exp", "iss", "sub", "aud"]);
            }
            None => {
                validation.validate_aud = false;
                validation.set_required_spec_claims(&["exp", "iss", "sub"]);
            }
        }

        validation
    }
}
