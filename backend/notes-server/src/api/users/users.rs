//! Local account handlers: register, login, change password.

use crate::{
    ApiError, ApiResult, AppState, ChangePasswordRequest, CurrentUser, JsonBody, LoginRequest,
    MessageResponse, RegisterRequest, SessionResponse, SessionUserDto,
};

use notes_auth::IssuedSession;
use notes_core::FieldValidator;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
};

pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-access-token");

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<SessionResponse>)> {
    let limits = &state.validation;
    let name = FieldValidator::required_text(req.name.as_deref(), "name", 1, limits.max_name_length)?;
    let email = FieldValidator::email(req.email.as_deref())?;
    let password =
        FieldValidator::password(req.password.as_deref(), "password", limits.min_password_length)?;

    let session = state.accounts.register(&name, &email, &password).await?;

    session_reply(StatusCode::CREATED, "User registration successful", session)
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<SessionResponse>)> {
    let email = FieldValidator::email(req.email.as_deref())?;
    // Length rules apply to new passwords only
    let password = FieldValidator::password(req.password.as_deref(), "password", 1)?;

    let session = state.accounts.login(&email, &password).await?;

    session_reply(StatusCode::OK, "User login successful", session)
}

/// PUT /api/users/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let new_password = FieldValidator::password(
        req.new_password.as_deref(),
        "newPassword",
        state.validation.min_password_length,
    )?;

    state
        .accounts
        .change_password(&user, req.current_password.as_deref(), &new_password)
        .await?;

    Ok(Json(MessageResponse::ok("Password has been changed!")))
}

fn session_reply(
    status: StatusCode,
    message: &str,
    session: IssuedSession,
) -> ApiResult<(StatusCode, HeaderMap, Json<SessionResponse>)> {
    let mut headers = HeaderMap::new();
    let token = HeaderValue::from_str(&session.access_token)
        .map_err(|e| ApiError::internal(format!("Token is not a valid header value: {}", e)))?;
    headers.insert(ACCESS_TOKEN_HEADER, token);

    Ok((
        status,
        headers,
        Json(SessionResponse {
            success: true,
            status_code: status.as_u16(),
            message: message.to_string(),
            user: SessionUserDto::from(session),
        }),
    ))
}
