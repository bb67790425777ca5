//! SQLite-backed [`UserStore`].

use crate::{DbError, Result as DbErrorResult, UserStore};

use notes_core::{Provider, User};

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, federated_subject, picture, \
                            provider, created_at, updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: &SqliteRow) -> DbErrorResult<User> {
        let id: String = row.try_get("id")?;
        let provider: String = row.try_get("provider")?;
        let created_at: i64 = row.try_get("created_at")?;
        let updated_at: i64 = row.try_get("updated_at")?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DbError::decode(format!("Invalid UUID in users.id: {}", e)))?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            federated_subject: row.try_get("federated_subject")?,
            picture: row.try_get("picture")?,
            provider: Provider::from_str(&provider)
                .map_err(|e| DbError::decode(format!("Invalid users.provider: {}", e)))?,
            created_at: timestamp(created_at, "users.created_at")?,
            updated_at: timestamp(updated_at, "users.updated_at")?,
        })
    }
}

pub(crate) fn timestamp(millis: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DbError::decode(format!("Invalid timestamp in {}", column)))
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_subject_or_email(
        &self,
        subject: Option<&str>,
        email: &str,
    ) -> DbErrorResult<Vec<User>> {
        let email = User::normalize_email(email);

        let rows = match subject {
            Some(subject) => {
                sqlx::query(&format!(
                    "SELECT {USER_COLUMNS} FROM users \
                     WHERE federated_subject = ?1 OR email = ?2 \
                     ORDER BY CASE WHEN federated_subject = ?1 THEN 0 ELSE 1 END"
                ))
                .bind(subject)
                .bind(&email)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                    .bind(&email)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(User::normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn insert(&self, user: &User) -> DbErrorResult<()> {
        user.validate()?;

        sqlx::query(
            r#"
                INSERT INTO users (
                    id, name, email, password_hash, federated_subject, picture,
                    provider, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.federated_subject)
        .bind(&user.picture)
        .bind(user.provider.as_str())
        .bind(user.created_at.timestamp_millis())
        .bind(user.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, user: &User) -> DbErrorResult<bool> {
        user.validate()?;

        let result = sqlx::query(
            r#"
                UPDATE users
                SET name = ?, email = ?, password_hash = ?, federated_subject = ?,
                    picture = ?, provider = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.federated_subject)
        .bind(&user.picture)
        .bind(user.provider.as_str())
        .bind(user.updated_at.timestamp_millis())
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
