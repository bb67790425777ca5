use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] notes_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] notes_db::DbError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] notes_auth::AuthError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
