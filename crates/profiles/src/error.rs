use thiserror::Error;

use ballerbio_core::{DomainError, StoreError, UserId};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("user {0} already has a profile")]
    ProfileExists(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProfileError {
    /// Translate a failed child write. A foreign-key rejection means the
    /// parent vanished between the existence check and the insert.
    pub(crate) fn from_write(err: StoreError, parent: &'static str, id: i64) -> Self {
        match err {
            StoreError::ForeignKeyViolation(_) => DomainError::parent_not_found(parent, id).into(),
            other => Self::Store(other),
        }
    }
}
