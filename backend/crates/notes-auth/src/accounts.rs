//! Local account lifecycle: registration, password login and password change.

use crate::{
    AuthError, CredentialVerifier, LocalClaims, LocalTokenIssuer, Result as AuthErrorResult,
};

use notes_core::User;
use notes_db::UserStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::info;

/// A user together with a freshly issued local token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: User,
    pub access_token: String,
}

pub struct AccountService {
    users: Arc<dyn UserStore>,
    passwords: CredentialVerifier,
    tokens: Arc<LocalTokenIssuer>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: CredentialVerifier,
        tokens: Arc<LocalTokenIssuer>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Expects already-validated input.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AuthErrorResult<IssuedSession> {
        let email = User::normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(already_registered(&email));
        }

        let hash = self.passwords.hash(password).await?;
        let user = User::new_local(name.to_string(), &email, hash);

        self.users.insert(&user).await.map_err(|e| {
            if e.is_unique_violation() {
                already_registered(&email)
            } else {
                AuthError::from(e)
            }
        })?;
        info!("Registered local user {}", user.id);

        self.session_for(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthErrorResult<IssuedSession> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(AuthError::user_not_found)?;

        // Federated-only accounts have no password to match
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(incorrect_password());
        };

        if !self.passwords.verify(password, hash).await {
            return Err(incorrect_password());
        }

        self.session_for(user)
    }

    /// Re-hash and store a new password. When the account already has one,
    /// `current_password` must match it.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: Option<&str>,
        new_password: &str,
    ) -> AuthErrorResult<User> {
        if let Some(existing) = user.password_hash.as_deref() {
            let Some(current) = current_password else {
                return Err(incorrect_password());
            };
            if !self.passwords.verify(current, existing).await {
                return Err(incorrect_password());
            }
        }

        let mut updated = user.clone();
        updated.set_password_hash(self.passwords.hash(new_password).await?);

        if !self.users.update(&updated).await? {
            return Err(AuthError::user_not_found());
        }
        info!("Password changed for user {}", updated.id);

        Ok(updated)
    }

    pub fn session_for(&self, user: User) -> AuthErrorResult<IssuedSession> {
        let access_token = self.tokens.issue(&LocalClaims::for_user(&user))?;
        Ok(IssuedSession { user, access_token })
    }
}

#[track_caller]
fn already_registered(email: &str) -> AuthError {
    AuthError::EmailAlreadyRegistered {
        email: email.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn incorrect_password() -> AuthError {
    AuthError::IncorrectPassword {
        location: ErrorLocation::from(Location::caller()),
    }
}
