use notes_auth::IssuedSession;

use serde::Serialize;

/// Token claims plus the token itself, as returned by register and login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub access_token: String,
}

impl From<IssuedSession> for SessionUserDto {
    fn from(session: IssuedSession) -> Self {
        Self {
            id: session.user.id.to_string(),
            name: session.user.name,
            email: session.user.email,
            access_token: session.access_token,
        }
    }
}
