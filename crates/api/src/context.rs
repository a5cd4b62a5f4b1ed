use chrono::{DateTime, Utc};
use serde::Serialize;

use ballerbio_auth::JwtClaims;
use ballerbio_core::UserId;

/// Authenticated caller, attached to the request by the auth middleware.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalContext {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

impl PrincipalContext {
    pub fn new(user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self { user_id, expires_at }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl From<&JwtClaims> for PrincipalContext {
    fn from(claims: &JwtClaims) -> Self {
        Self::new(claims.user_id, claims.expires_at)
    }
}
