use crate::DEFAULT_LOG_LEVEL;

use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Log verbosity read from config or `NOTES_LOG_LEVEL`.
///
/// Never fails to parse: anything `log` does not recognise means info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(DEFAULT_LOG_LEVEL)
    }
}

impl FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LevelFilter::from_str(s.trim()).map_or_else(|_| LogLevel::default(), LogLevel))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-string values (e.g. `level = 3`) are tolerated too
        let level = match String::deserialize(deserializer) {
            Ok(raw) => raw.parse().unwrap_or_default(),
            Err(_) => LogLevel::default(),
        };
        Ok(level)
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
