//! Claim sets. Only produced after a signature has been verified.

use notes_core::User;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of a self-issued token: exactly who the user is, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalClaims {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl LocalClaims {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// On-the-wire form of a local token: the claims plus registered timestamps.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LocalTokenPayload {
    #[serde(flatten)]
    pub claims: LocalClaims,
    pub iat: i64,
    pub exp: i64,
}

/// Identity asserted by the federated provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedClaims {
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub issuer: String,
}

/// Raw provider payload; only the fields we project are read.
#[derive(Debug, Deserialize)]
pub(crate) struct FederatedTokenPayload {
    pub sub: String,
    pub iss: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// A claim set that has passed verification on one of the two paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifiedClaims {
    Local(LocalClaims),
    Federated(FederatedClaims),
}

/// Input to identity resolution. `subject` is absent for callers that only
/// know an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub subject: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl From<FederatedClaims> for IdentityClaims {
    fn from(claims: FederatedClaims) -> Self {
        Self {
            subject: Some(claims.subject),
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        }
    }
}
