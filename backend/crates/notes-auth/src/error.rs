use notes_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No bearer token presented {location}")]
    NoToken { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    ExpiredToken { location: ErrorLocation },

    #[error("Untrusted issuer '{issuer}' {location}")]
    UntrustedIssuer {
        issuer: String,
        location: ErrorLocation,
    },

    /// The signing-key directory could not be reached or read. Says nothing
    /// about the token itself.
    #[error("Signing key lookup failed: {message} {location}")]
    KeyLookupFailure {
        message: String,
        location: ErrorLocation,
    },

    #[error("User not found {location}")]
    UserNotFound { location: ErrorLocation },

    /// A concurrent writer claimed the same email or subject first
    #[error("Conflicting write on '{field}', retry {location}")]
    ConflictRetry {
        field: String,
        location: ErrorLocation,
    },

    #[error("Persistence failure: {source} {location}")]
    Persistence {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {message} {location}")]
    Signing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid auth configuration: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("{email} is already registered {location}")]
    EmailAlreadyRegistered {
        email: String,
        location: ErrorLocation,
    },

    #[error("Incorrect password {location}")]
    IncorrectPassword { location: ErrorLocation },
}

impl AuthError {
    #[track_caller]
    pub fn no_token() -> Self {
        Self::NoToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_token<S: Into<String>>(message: S) -> Self {
        Self::InvalidToken {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn key_lookup<S: Into<String>>(message: S) -> Self {
        Self::KeyLookupFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_not_found() -> Self {
        Self::UserNotFound {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Kinds that describe "who is calling" going wrong. At the HTTP boundary
    /// these all become the same 401.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::NoToken { .. }
                | Self::InvalidToken { .. }
                | Self::ExpiredToken { .. }
                | Self::UntrustedIssuer { .. }
                | Self::KeyLookupFailure { .. }
                | Self::UserNotFound { .. }
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictRetry { .. })
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match source {
            DbError::UniqueViolation { field, .. } => Self::ConflictRetry { field, location },
            other => Self::Persistence {
                source: other,
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
