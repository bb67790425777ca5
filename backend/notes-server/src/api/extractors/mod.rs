pub mod current_user;
pub mod json_body;
pub mod note_id;
