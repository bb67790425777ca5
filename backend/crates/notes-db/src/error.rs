use notes_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

const UNIQUE_FAILED_PREFIX: &str = "UNIQUE constraint failed: ";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    /// A UNIQUE index rejected the write. `field` is the last column named
    /// by the violated constraint, e.g. "email" or "title".
    #[error("Unique constraint violated on {field} {location}")]
    UniqueViolation {
        field: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    /// The record was refused before any SQL ran
    #[error("Refusing to write inconsistent record: {source} {location}")]
    Invariant {
        source: CoreError,
        location: ErrorLocation,
    },

    /// A stored row could not be turned back into a domain value
    #[error("Corrupt row: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation { .. })
    }

    #[track_caller]
    pub(crate) fn decode<S: Into<String>>(message: S) -> Self {
        DbError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(db_err) = &source
            && db_err.is_unique_violation()
        {
            return Self::UniqueViolation {
                field: unique_field(db_err.message()),
                location,
            };
        }

        Self::Sqlx { source, location }
    }
}

impl From<CoreError> for DbError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Invariant {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// "UNIQUE constraint failed: notes.user_id, notes.title" -> "title"
pub(crate) fn unique_field(message: &str) -> String {
    message
        .strip_prefix(UNIQUE_FAILED_PREFIX)
        .and_then(|columns| columns.rsplit(',').next())
        .map(|column| column.trim())
        .map(|column| column.rsplit('.').next().unwrap_or(column).to_string())
        .unwrap_or_else(|| String::from("unknown"))
}

pub type Result<T> = std::result::Result<T, DbError>;
