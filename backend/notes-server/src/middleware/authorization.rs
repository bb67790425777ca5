//! Authorization layer for protected routes.
//!
//! Hands the `Authorization` header to the [`Authenticator`] state machine
//! and, once it reaches `Authorized`, injects [`CurrentUser`] into the request
//! extensions. Handlers never look at tokens themselves.
//!
//! [`Authenticator`]: notes_auth::Authenticator

use crate::{ApiError, AppState, CurrentUser};

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let user = state
        .authenticator
        .authenticate(header.as_deref())
        .await
        .map_err(ApiError::unauthenticated)?;

    log::debug!("Authorized user {} for {}", user.id, req.uri().path());
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
