pub mod change_password_request;
pub mod login_request;
pub mod register_request;
pub mod session_response;
pub mod session_user_dto;
pub mod users;
