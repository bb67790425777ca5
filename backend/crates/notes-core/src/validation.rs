//! Field-level checks for request payloads.
//!
//! Lengths are counted in characters, not bytes, after trimming.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub struct FieldValidator;

impl FieldValidator {
    /// Required text field. Returns the trimmed value.
    #[track_caller]
    pub fn required_text(
        value: Option<&str>,
        field: &str,
        min_length: usize,
        max_length: usize,
    ) -> CoreErrorResult<String> {
        let Some(value) = value else {
            return Err(Self::error(field, "", format!("{} is a required field", field)));
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Self::error(field, value, format!("{} is a required field", field)));
        }

        Self::validate_length(trimmed, field, min_length, max_length)?;
        Ok(trimmed.to_string())
    }

    /// Optional text field; `None` passes through untouched.
    #[track_caller]
    pub fn optional_text(
        value: Option<&str>,
        field: &str,
        min_length: usize,
        max_length: usize,
    ) -> CoreErrorResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(_) => Self::required_text(value, field, min_length, max_length).map(Some),
        }
    }

    #[track_caller]
    pub fn validate_length(
        value: &str,
        field: &str,
        min_length: usize,
        max_length: usize,
    ) -> CoreErrorResult<()> {
        let length = value.chars().count();

        if length < min_length {
            return Err(Self::error(
                field,
                value,
                format!("{} must be at least {} characters", field, min_length),
            ));
        }

        if length > max_length {
            return Err(Self::error(
                field,
                value,
                format!("{} must be at most {} characters", field, max_length),
            ));
        }

        Ok(())
    }

    /// Shape check only: one `@`, non-empty local part, dotted domain.
    /// Returns the normalized (trimmed, lowercase) address.
    #[track_caller]
    pub fn email(value: Option<&str>) -> CoreErrorResult<String> {
        let Some(value) = value else {
            return Err(Self::error("email", "", "email is a required field".to_string()));
        };

        let normalized = value.trim().to_lowercase();
        let valid = match normalized.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && domain.contains('.')
                    && !normalized.contains(char::is_whitespace)
            }
            None => false,
        };

        if !valid {
            return Err(Self::error(
                "email",
                value,
                "email must be a valid email".to_string(),
            ));
        }

        Ok(normalized)
    }

    /// Password presence and minimum length. Never trimmed.
    #[track_caller]
    pub fn password(value: Option<&str>, field: &str, min_length: usize) -> CoreErrorResult<String> {
        let Some(value) = value else {
            return Err(Self::error(field, "", format!("{} is a required field", field)));
        };

        if value.chars().count() < min_length {
            // The value is a secret and is never echoed back
            return Err(Self::error(
                field,
                "",
                format!("{} must be at least {} characters", field, min_length),
            ));
        }

        Ok(value.to_string())
    }

    #[track_caller]
    fn error(field: &str, value: &str, message: String) -> CoreError {
        CoreError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
