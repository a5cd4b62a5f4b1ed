//! Parent-existence checks run before every write that references a parent.
//!
//! Each check is validate-presence, lookup, reject-if-absent. A successful
//! check hands back the typed id so the caller cannot skip it.

use async_trait::async_trait;

use ballerbio_core::{DomainError, DomainResult, ProfileId, StoreResult, UserId};

use crate::error::ProfileError;

/// Existence lookups against the store.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    async fn user_exists(&self, id: UserId) -> StoreResult<bool>;
    async fn profile_exists(&self, id: ProfileId) -> StoreResult<bool>;
}

/// Reject an absent or non-positive parent reference.
pub fn require_declared(parent: &'static str, declared: Option<i64>) -> DomainResult<i64> {
    match declared {
        Some(raw) if raw > 0 => Ok(raw),
        _ => Err(DomainError::validation(format!(
            "{parent}_id is required and must be non-zero"
        ))),
    }
}

pub async fn ensure_user<L>(lookup: &L, declared: Option<i64>) -> Result<UserId, ProfileError>
where
    L: ParentLookup + ?Sized,
{
    let raw = require_declared("user", declared)?;
    let id = UserId::new(raw);
    if !lookup.user_exists(id).await? {
        tracing::debug!(user_id = raw, "write rejected: user does not exist");
        return Err(DomainError::parent_not_found("user", raw).into());
    }
    Ok(id)
}

pub async fn ensure_profile<L>(lookup: &L, declared: Option<i64>) -> Result<ProfileId, ProfileError>
where
    L: ParentLookup + ?Sized,
{
    let raw = require_declared("profile", declared)?;
    let id = ProfileId::new(raw);
    if !lookup.profile_exists(id).await? {
        tracing::debug!(profile_id = raw, "write rejected: profile does not exist");
        return Err(DomainError::parent_not_found("profile", raw).into());
    }
    Ok(id)
}
