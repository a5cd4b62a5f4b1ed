//! User accounts and the commands that create or authenticate them.

use serde::{Deserialize, Serialize};

use ballerbio_core::{DomainError, DomainResult, Email, Entity, Timestamps, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Stored user identity.
///
/// # Invariants
/// - `username` and `email` are unique across all users.
/// - `password_hash` is an Argon2 PHC string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

/// Row to insert; the store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password_hash: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterUser {
    /// Returns the trimmed username and the normalized email.
    pub fn validate(&self) -> DomainResult<(String, Email)> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("username is required and must not be empty"));
        }
        if self.password.is_empty() {
            return Err(DomainError::validation("password is required and must not be empty"));
        }
        let email = Email::parse(&self.email)?;
        Ok((username.to_string(), email))
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl LoginUser {
    pub fn validate(&self) -> DomainResult<Email> {
        let email = Email::parse(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::validation("password is required and must not be empty"));
        }
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn register(username: &str, password: &str, email: &str) -> RegisterUser {
        RegisterUser {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn register_validation_normalizes() {
        let (username, email) = register(" ana ", "secret123", "A@X.com").validate().unwrap();
        assert_eq!(username, "ana");
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn register_rejects_missing_fields() {
        assert!(register("", "secret123", "a@x.com").validate().is_err());
        assert!(register("ana", "", "a@x.com").validate().is_err());
        assert!(register("ana", "secret123", "").validate().is_err());
        assert!(register("ana", "secret123", "not-an-email").validate().is_err());
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = User {
            id: UserId::new(1),
            username: "ana".to_string(),
            email: Email::parse("a@x.com").unwrap(),
            password_hash: "$argon2id$v=19$...".to_string(),
            timestamps: Timestamps::created(Utc::now()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "ana");
        assert_eq!(json["email"], "a@x.com");
        assert!(json["deleted_at"].is_null());
    }
}
