//! GET|POST /api/profile
//!
//! The authorization layer has already resolved (and, on a first federated
//! sign-in, created or linked) the user, so both verbs just report it.

use crate::{ApiResult, CurrentUser, ProfileResponse};

use axum::{Json, http::StatusCode};

pub async fn profile(CurrentUser(user): CurrentUser) -> ApiResult<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        message: "User profile retrieved successfully".to_string(),
        user: user.into(),
    }))
}
