//! REST API error envelope
//!
//! Every failure leaves the server as
//! `{ "success": false, "statusCode": N, "message": "..." }`; validation
//! failures add `"error": { "key", "value", "message" }`.

use notes_auth::AuthError;
use notes_core::CoreError;
use notes_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const NO_TOKEN_MESSAGE: &str = "No token provided";
pub const TOKEN_REJECTED_MESSAGE: &str = "Token verification failed";
const INTERNAL_MESSAGE: &str = "Unexpected error occurred! Internal server error!";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationDetail>,
}

/// Field-level detail of a rejected payload
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub key: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401. The message is generic; the cause is only logged.
    #[error("Unauthorized: {cause} {location}")]
    Unauthorized {
        message: &'static str,
        cause: String,
        location: ErrorLocation,
    },

    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed on {field}: {message} {location}")]
    Validation {
        field: String,
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// A write kept colliding with a concurrent one, even after the retry
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// 500. `message` is logged, never sent.
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Mapping used at the authorization boundary: every failure to establish
    /// who is calling is a 401, except a write conflict that survived its retry.
    #[track_caller]
    pub fn unauthenticated(error: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if error.is_conflict() {
            return Self::Conflict {
                message: String::from("Concurrent sign-in in progress, please retry"),
                location,
            };
        }

        let message = match error {
            AuthError::NoToken { .. } => NO_TOKEN_MESSAGE,
            _ => TOKEN_REJECTED_MESSAGE,
        };

        Self::Unauthorized {
            message,
            cause: error.to_string(),
            location,
        }
    }

    /// Duplicate-key message for a unique violation on `field`
    #[track_caller]
    pub fn duplicate(field: &str, value: &str) -> Self {
        if field == "email" {
            return Self::bad_request(format!("{} is already registered!", value));
        }

        Self::bad_request(format!(
            "A field value already exists. Field: \"{}\", Value: \"{}\"",
            field, value
        ))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            ApiError::Unauthorized { .. } => log::warn!("{}", self),
            _ => log::debug!("{}", self),
        }

        let (message, error) = match self {
            ApiError::Unauthorized { message, .. } => (message.to_string(), None),
            ApiError::Validation {
                field,
                value,
                message,
                ..
            } => (
                message.clone(),
                Some(ValidationDetail {
                    key: field,
                    value,
                    message,
                }),
            ),
            ApiError::NotFound { message, .. }
            | ApiError::BadRequest { message, .. }
            | ApiError::Conflict { message, .. } => (message, None),
            ApiError::Internal { .. } => (INTERNAL_MESSAGE.to_string(), None),
        };

        let body = ApiErrorResponse {
            success: false,
            status_code: status.as_u16(),
            message,
            error,
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::Validation {
                field,
                value,
                message,
                ..
            } => ApiError::Validation {
                field,
                value,
                message,
                location,
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::UniqueViolation { field, .. } => ApiError::BadRequest {
                message: format!("A field value already exists. Field: \"{}\"", field),
                location,
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

/// Outside the authorization boundary: account errors keep their own meaning.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            AuthError::EmailAlreadyRegistered { email, .. } => ApiError::BadRequest {
                message: format!("{} is already registered!", email),
                location,
            },
            AuthError::IncorrectPassword { .. } => ApiError::BadRequest {
                message: String::from("Incorrect password!"),
                location,
            },
            AuthError::UserNotFound { .. } => ApiError::NotFound {
                message: String::from("User not found!"),
                location,
            },
            AuthError::ConflictRetry { field, .. } => ApiError::Conflict {
                message: format!("Concurrent update on {}, please retry", field),
                location,
            },
            other if other.is_authentication_failure() => ApiError::unauthenticated(other),
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
