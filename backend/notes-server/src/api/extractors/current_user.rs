//! The user the authorization layer attached to the request.

use crate::ApiError;

use notes_auth::AuthError;
use notes_core::User;

use axum::{extract::FromRequestParts, http::request::Parts};

#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only when a route is mounted outside the authorization layer
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthenticated(AuthError::no_token()))
    }
}
