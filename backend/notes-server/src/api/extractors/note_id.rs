//! `{id}` path segment that must be a UUID.

use crate::ApiError;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

pub struct NoteId(pub Uuid);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Uuid::parse_str(&raw)
            .map(NoteId)
            .map_err(|_| ApiError::bad_request(format!("Id {} in url parameter is not a valid id", raw)))
    }
}
