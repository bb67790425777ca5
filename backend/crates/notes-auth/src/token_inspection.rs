//! Reading a token before trusting it.
//!
//! Nothing here checks a signature. The values are only good for deciding
//! which verifier gets the token.

use crate::{AuthError, Result as AuthErrorResult};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

const BEARER_SCHEME: &str = "bearer";

#[derive(Deserialize)]
struct UnverifiedIssuer {
    iss: Option<String>,
}

/// Token from an `Authorization: Bearer <token>` header value. The scheme is
/// matched case-insensitively; anything else yields `None`.
pub fn extract_bearer(header_value: Option<&str>) -> Option<&str> {
    let (scheme, token) = header_value?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// `iss` from the payload segment, without verifying anything.
#[track_caller]
pub fn peek_issuer(token: &str) -> AuthErrorResult<Option<String>> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::invalid_token("token is not three dot-separated segments"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::invalid_token(format!("payload is not base64url: {}", e)))?;

    let parsed: UnverifiedIssuer = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::invalid_token(format!("payload is not a JSON object: {}", e)))?;

    Ok(parsed.iss)
}
