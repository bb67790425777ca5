use crate::SessionUserDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub user: SessionUserDto,
}
