use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Required, validated against the configured length bounds
    #[serde(default)]
    pub title: Option<String>,

    /// Defaults to an empty string
    #[serde(default)]
    pub description: Option<String>,
}
