use chrono::{DateTime, Utc};
use serde::Serialize;

use ballerbio_auth::{LoginOutcome, User};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            message: "Login successful.",
            user: outcome.user,
            token: outcome.token,
            expires_at: outcome.expires_at,
        }
    }
}
