//! User entity - the canonical identity record.
//!
//! A record is created either by local registration (password hash, provider
//! `local`) or by the first successful federated login (subject, provider
//! `federated`). A local record that later signs in through the identity
//! provider is linked in place: it gains the subject and picture, flips its
//! provider, and keeps its password hash so both sign-in paths keep working.

use crate::{CoreError, Provider, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Globally unique, stored normalized (trimmed, lowercase)
    pub email: String,
    pub password_hash: Option<String>,
    /// Identity-provider subject; unique among records that have one
    pub federated_subject: Option<String>,
    pub picture: Option<String>,
    pub provider: Provider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a local account from an already-hashed password
    pub fn new_local(name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: Self::normalize_email(email),
            password_hash: Some(password_hash),
            federated_subject: None,
            picture: None,
            provider: Provider::Local,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account projected from federated claims
    pub fn new_federated(
        name: String,
        email: &str,
        subject: String,
        picture: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: Self::normalize_email(email),
            password_hash: None,
            federated_subject: Some(subject),
            picture,
            provider: Provider::Federated,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a federated identity to this record. The password hash is kept.
    pub fn link_federated(&mut self, subject: String, picture: Option<String>) {
        self.federated_subject = Some(subject);
        self.picture = picture;
        self.provider = Provider::Federated;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.updated_at = Utc::now();
    }

    /// True when a federated subject is attached
    pub fn is_linked(&self) -> bool {
        self.federated_subject.is_some()
    }

    /// Canonical form used for storage and lookups
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Display name fallback: the local part of the email address
    pub fn default_name_for(email: &str) -> String {
        let trimmed = email.trim();
        match trimmed.split_once('@') {
            Some((local, _)) if !local.is_empty() => local.to_string(),
            _ => trimmed.to_string(),
        }
    }

    /// Provider/credential consistency.
    ///
    /// `local` requires a password hash and `federated` requires a subject;
    /// a linked record may hold both.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.email.is_empty() {
            return Err(CoreError::UserInvariant {
                message: "email cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self.provider {
            Provider::Local if self.password_hash.is_none() => Err(CoreError::UserInvariant {
                message: "local user requires a password hash".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Provider::Federated if self.federated_subject.is_none() => {
                Err(CoreError::UserInvariant {
                    message: "federated user requires a subject identifier".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            _ => Ok(()),
        }
    }
}
