//! Request authorization as an explicit state machine.
//!
//! ```text
//! NoToken ------------------------------------------------> reject
//! TokenPresent --iss == trusted issuer--> FederatedPath --> Authorized
//!              \-otherwise------------->  LocalPath     --> Authorized
//! ```
//!
//! `route` is the only place that decides which verifier a token goes to.

use crate::token_inspection::{extract_bearer, peek_issuer};
use crate::{
    AuthError, FederatedVerifier, IdentityClaims, IdentityResolver, LocalTokenIssuer,
    Result as AuthErrorResult, VerifiedClaims,
};

use notes_core::User;
use notes_db::UserStore;

use std::sync::Arc;

use log::trace;

pub enum AuthState<'a> {
    NoToken,
    TokenPresent(&'a str),
    FederatedPath(&'a str),
    LocalPath(&'a str),
    Authorized(User),
}

impl AuthState<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoToken => "NoToken",
            Self::TokenPresent(_) => "TokenPresent",
            Self::FederatedPath(_) => "FederatedPath",
            Self::LocalPath(_) => "LocalPath",
            Self::Authorized(_) => "Authorized",
        }
    }
}

pub struct Authenticator {
    local: Arc<LocalTokenIssuer>,
    federated: Option<FederatedVerifier>,
    resolver: IdentityResolver,
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(
        local: Arc<LocalTokenIssuer>,
        federated: Option<FederatedVerifier>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            local,
            federated,
            resolver: IdentityResolver::new(users.clone()),
            users,
        }
    }

    pub fn federated(&self) -> Option<&FederatedVerifier> {
        self.federated.as_ref()
    }

    /// Drive the state machine from a raw `Authorization` header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AuthErrorResult<User> {
        let mut state = match extract_bearer(authorization) {
            Some(token) => AuthState::TokenPresent(token),
            None => AuthState::NoToken,
        };

        loop {
            trace!("auth state: {}", state.name());
            state = match state {
                AuthState::NoToken => return Err(AuthError::no_token()),
                AuthState::TokenPresent(token) => self.route(token)?,
                AuthState::FederatedPath(token) => {
                    AuthState::Authorized(self.authorize_federated(token).await?)
                }
                AuthState::LocalPath(token) => {
                    AuthState::Authorized(self.authorize_local(token).await?)
                }
                AuthState::Authorized(user) => return Ok(user),
            };
        }
    }

    /// TokenPresent -> FederatedPath | LocalPath, decided on the unverified
    /// issuer claim. A token that cannot even be decoded is rejected here.
    pub fn route<'a>(&self, token: &'a str) -> AuthErrorResult<AuthState<'a>> {
        let issuer = peek_issuer(token)?;

        let federated = match (&self.federated, issuer) {
            (Some(verifier), Some(issuer)) => verifier.is_trusted_issuer(&issuer),
            _ => false,
        };

        Ok(if federated {
            AuthState::FederatedPath(token)
        } else {
            AuthState::LocalPath(token)
        })
    }

    /// Verify on whichever path `route` picks, without touching persistence.
    pub async fn verify(&self, token: &str) -> AuthErrorResult<VerifiedClaims> {
        match self.route(token)? {
            AuthState::FederatedPath(token) => {
                let verifier = self.federated_verifier()?;
                Ok(VerifiedClaims::Federated(verifier.verify(token).await?))
            }
            _ => Ok(VerifiedClaims::Local(self.local.verify(token)?)),
        }
    }

    async fn authorize_federated(&self, token: &str) -> AuthErrorResult<User> {
        let claims = self.federated_verifier()?.verify(token).await?;
        self.resolver.resolve(&IdentityClaims::from(claims)).await
    }

    async fn authorize_local(&self, token: &str) -> AuthErrorResult<User> {
        let claims = self.local.verify(token)?;
        self.users
            .find_by_id(claims.id)
            .await?
            .ok_or_else(AuthError::user_not_found)
    }

    fn federated_verifier(&self) -> AuthErrorResult<&FederatedVerifier> {
        self.federated
            .as_ref()
            .ok_or_else(|| AuthError::invalid_token("federated sign-in is not enabled"))
    }
}
