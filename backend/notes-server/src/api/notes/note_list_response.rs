use crate::NoteDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListResponse {
    pub success: bool,
    pub status_code: u16,
    pub total_results: usize,
    /// Newest first
    pub notes: Vec<NoteDto>,
}
