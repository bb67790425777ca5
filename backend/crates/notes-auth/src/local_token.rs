//! Local Token Issuer/Verifier: HS256 tokens signed with the server secret.
//!
//! Tokens are stateless. There is no revocation list, so a token stays valid
//! until it expires.

use crate::claims::LocalTokenPayload;
use crate::{AuthError, LocalClaims, Result as AuthErrorResult};

use std::panic::Location;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

pub const LOCAL_TOKEN_TTL_DAYS: i64 = 30;

/// Issuer and verifier share one clock, so expiry is exact
const LEEWAY_SECS: u64 = 0;

pub struct LocalTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl LocalTokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECS;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(&self, claims: &LocalClaims) -> AuthErrorResult<String> {
        self.issue_at(claims, Utc::now())
    }

    /// Issue as if at `issued_at`; expiry is `issued_at` + 30 days.
    #[track_caller]
    pub fn issue_at(
        &self,
        claims: &LocalClaims,
        issued_at: DateTime<Utc>,
    ) -> AuthErrorResult<String> {
        let payload = LocalTokenPayload {
            claims: claims.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(LOCAL_TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key).map_err(|e| {
            AuthError::Signing {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<LocalClaims> {
        let data = decode::<LocalTokenPayload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken {
                    location: ErrorLocation::from(Location::caller()),
                },
                _ => AuthError::InvalidToken {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                },
            })?;

        Ok(data.claims.claims)
    }
}
