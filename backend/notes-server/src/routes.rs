use crate::middleware::{authorization::require_user, request_logging::log_request};
use crate::{
    AppState, change_password, create_note, delete_note, get_note, health, list_notes, login,
    profile, register, update_note,
};

use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

/// Build the application router.
///
/// `base_path` prefixes every REST route (e.g. "/api"); `/health` stays at
/// the root.
pub fn build_router(state: AppState, base_path: &str, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .route("/profile", get(profile).post(profile))
        .route("/users/password", put(change_password))
        .route("/notes", post(create_note).get(list_notes))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let public = Router::new()
        .route("/", get(health::server_up))
        .route("/users/register", post(register))
        .route("/users/login", post(login));

    Router::new()
        .route("/health", get(health::health))
        .nest(base_path, public.merge(protected))
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
}
