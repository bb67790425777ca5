use serde::Serialize;

/// Success envelope with nothing but a message
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

impl MessageResponse {
    pub fn ok<S: Into<String>>(message: S) -> Self {
        Self {
            success: true,
            status_code: 200,
            message: message.into(),
        }
    }
}
