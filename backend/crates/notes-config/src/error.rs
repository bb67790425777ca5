use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Config section an invalid value was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Auth,
    Federated,
    Database,
    Server,
    Validation,
    General,
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auth => "auth",
            Self::Federated => "auth.federated",
            Self::Database => "database",
            Self::Server => "server",
            Self::Validation => "validation",
            Self::General => "config",
        };
        f.write_str(name)
    }
}

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Invalid [{section}] setting: {message} {location}")]
    Invalid {
        section: ConfigSection,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot access {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Malformed TOML in {path}: {source} {location}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(section: ConfigSection, message: S) -> Self {
        ConfigError::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Auth, message)
    }

    #[track_caller]
    pub fn federated<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Federated, message)
    }

    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Database, message)
    }

    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Server, message)
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Validation, message)
    }

    #[track_caller]
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::General, message)
    }

    #[track_caller]
    pub(crate) fn io(path: PathBuf, source: std::io::Error) -> Self {
        ConfigError::Io {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn toml(path: PathBuf, source: toml::de::Error) -> Self {
        ConfigError::Toml {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section the error belongs to; `None` for file access and parse errors
    pub fn section(&self) -> Option<ConfigSection> {
        match self {
            ConfigError::Invalid { section, .. } => Some(*section),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
