pub mod note;
pub mod provider;
pub mod user;
