use notes_auth::{AccountService, Authenticator};
use notes_config::ValidationConfig;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared by every handler; constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub authenticator: Arc<Authenticator>,
    pub accounts: Arc<AccountService>,
    pub validation: ValidationConfig,
}
