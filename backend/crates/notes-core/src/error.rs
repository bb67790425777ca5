use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Caller input rejected; `field` and `value` are echoed back to the client
    #[error("Validation error on {field}: {message} {location}")]
    Validation {
        field: String,
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid provider: {value} {location}")]
    InvalidProvider {
        value: String,
        location: ErrorLocation,
    },

    #[error("User invariant violated: {message} {location}")]
    UserInvariant {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
