use async_trait::async_trait;

use ballerbio_core::{Email, StoreResult, UserId};

use crate::user::{NewUser, User};

/// Persistence contract for user identities.
///
/// Absence is `Ok(None)`. Implementations enforce username/email uniqueness
/// atomically and report it as `StoreError::UniqueViolation` naming the column.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;
}
