use crate::Result as DbErrorResult;

use notes_core::User;

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence seam for user identities.
///
/// Writes that collide with the email index or the subject index fail with
/// `DbError::UniqueViolation`. A record breaking the provider/credential
/// rules of [`User::validate`] is refused with `DbError::Invariant`; every
/// other failure is `DbError::Sqlx` or `DbError::Decode`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every record whose subject equals `subject` OR whose email equals
    /// `email`, in a single query. A subject match, if any, comes first.
    async fn find_by_subject_or_email(
        &self,
        subject: Option<&str>,
        email: &str,
    ) -> DbErrorResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>>;

    async fn insert(&self, user: &User) -> DbErrorResult<()>;

    /// Overwrite the mutable columns of an existing record. Returns false when
    /// no record has the given id.
    async fn update(&self, user: &User) -> DbErrorResult<bool>;
}
