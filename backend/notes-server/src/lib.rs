pub mod api;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::{current_user::CurrentUser, json_body::JsonBody, note_id::NoteId},
    message_response::MessageResponse,
    notes::{
        create_note_request::CreateNoteRequest,
        note_dto::NoteDto,
        note_list_response::NoteListResponse,
        note_response::NoteResponse,
        notes::{create_note, delete_note, get_note, list_notes, update_note},
        update_note_request::UpdateNoteRequest,
    },
    profile::{profile::profile, profile_dto::ProfileDto, profile_response::ProfileResponse},
    users::{
        change_password_request::ChangePasswordRequest,
        login_request::LoginRequest,
        register_request::RegisterRequest,
        session_response::SessionResponse,
        session_user_dto::SessionUserDto,
        users::{ACCESS_TOKEN_HEADER, change_password, login, register},
    },
};
pub use bootstrap::build_state;
pub use routes::build_router;
pub use state::AppState;
