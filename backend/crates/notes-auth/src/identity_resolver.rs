//! Identity Resolver: find-or-create the canonical user for a claim set.
//!
//! Steps, in order:
//! 1. One OR lookup by subject and email. When the two match different
//!    records the subject match is canonical and the conflict is logged.
//! 2. Nothing found: create a federated user. The name defaults to the local
//!    part of the email.
//! 3. Found an unlinked record: link it. The password hash is kept.
//! 4. Found a linked record: return it untouched, so edits made by the user
//!    to name or picture survive later logins.
//!
//! A unique-index collision on insert or link means a concurrent request got
//! there first. The whole resolution is retried exactly once.

use crate::{AuthError, IdentityClaims, Result as AuthErrorResult};

use notes_core::User;
use notes_db::UserStore;

use std::sync::Arc;

use log::{debug, info, warn};

pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, claims: &IdentityClaims) -> AuthErrorResult<User> {
        match self.resolve_once(claims).await {
            Err(AuthError::ConflictRetry { field, .. }) => {
                debug!("Concurrent write on '{}' while resolving identity, retrying", field);
                self.resolve_once(claims).await
            }
            other => other,
        }
    }

    async fn resolve_once(&self, claims: &IdentityClaims) -> AuthErrorResult<User> {
        let email = User::normalize_email(&claims.email);
        let subject = claims.subject.as_deref();

        let mut matches = self.store.find_by_subject_or_email(subject, &email).await?;

        let subject_match = subject.and_then(|subject| {
            matches
                .iter()
                .position(|user| user.federated_subject.as_deref() == Some(subject))
        });

        let canonical = match subject_match {
            Some(index) => {
                let user = matches.swap_remove(index);
                if let Some(other) = matches.first() {
                    warn!(
                        "Identity conflict: subject matches user {} but email {} belongs to user {}; using the subject match",
                        user.id, email, other.id
                    );
                }
                Some(user)
            }
            None => matches.into_iter().next(),
        };

        match (canonical, subject) {
            (None, None) => Err(AuthError::user_not_found()),
            (None, Some(subject)) => self.create(claims, &email, subject).await,
            (Some(mut user), Some(subject)) if user.federated_subject.is_none() => {
                user.link_federated(subject.to_string(), claims.picture.clone());
                self.store.update(&user).await?;
                info!("Linked federated identity to existing user {}", user.id);
                Ok(user)
            }
            (Some(user), Some(subject)) => {
                if user.federated_subject.as_deref() != Some(subject) {
                    warn!(
                        "User {} is linked to a different subject than the one presented for {}",
                        user.id, email
                    );
                }
                Ok(user)
            }
            (Some(user), None) => Ok(user),
        }
    }

    async fn create(
        &self,
        claims: &IdentityClaims,
        email: &str,
        subject: &str,
    ) -> AuthErrorResult<User> {
        let name = claims
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .unwrap_or_else(|| User::default_name_for(email));

        let user = User::new_federated(
            name,
            email,
            subject.to_string(),
            claims.picture.clone(),
        );
        self.store.insert(&user).await?;
        info!("Created federated user {}", user.id);

        Ok(user)
    }
}
