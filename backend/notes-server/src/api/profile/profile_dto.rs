use notes_core::{Provider, User};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a user; credentials and the subject stay server-side
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub provider: Provider,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name,
            email: u.email,
            picture: u.picture,
            provider: u.provider,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
