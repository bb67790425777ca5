use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// In-memory SQLite pool with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    // In-memory needs a single connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    notes_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// File-backed pool so concurrent requests really hold separate connections
pub async fn create_file_pool(dir: &Path) -> SqlitePool {
    let pool = notes_db::connect(&dir.join("notes.db"), 4)
        .await
        .expect("Failed to open file pool");

    notes_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
