use serde::Deserialize;

/// Fields are optional here so that a missing one is reported through the
/// validation envelope instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
