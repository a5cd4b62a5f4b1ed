//! Registration and login.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use ballerbio_core::{DomainError, StoreError, UserId};

use crate::password::{self, PasswordError};
use crate::store::CredentialStore;
use crate::token::{JwtIssuer, TokenError};
use crate::user::{LoginUser, NewUser, RegisterUser, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("a user with this email already exists")]
    DuplicateEmail,

    #[error("a user with this username already exists")]
    DuplicateUsername,

    /// Unknown email and wrong password are deliberately the same error.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Verifies credentials and mints tokens.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<dyn JwtIssuer>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<dyn JwtIssuer>) -> Self {
        Self { store, tokens }
    }

    /// Create a user account.
    ///
    /// The email pre-check gives the caller a precise error; the store's unique
    /// constraint still guards concurrent registrations.
    pub async fn register(&self, cmd: RegisterUser) -> Result<User, AuthError> {
        let (username, email) = cmd.validate()?;

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_blocking(cmd.password).await?;

        let user = self
            .store
            .create_user(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(ref constraint) if constraint.contains("email") => {
                    AuthError::DuplicateEmail
                }
                StoreError::UniqueViolation(_) => AuthError::DuplicateUsername,
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate by email + password and issue a bearer token.
    pub async fn login(&self, cmd: LoginUser, now: DateTime<Utc>) -> Result<LoginOutcome, AuthError> {
        let email = cmd.validate()?;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            tracing::debug!("login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        match verify_blocking(cmd.password, user.password_hash.clone()).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(user_id = %user.id, "login rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(PasswordError::MalformedDigest(reason)) => {
                tracing::warn!(user_id = %user.id, %reason, "stored password digest is unreadable");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let issued = self.tokens.issue(user.id, now)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.claims.expires_at,
            user,
        })
    }

    pub async fn user(&self, id: UserId) -> Result<User, AuthError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or(AuthError::Domain(DomainError::NotFound))
    }
}

// Argon2 is CPU-bound; keep it off the async workers.

async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || password::hash(&password))
        .await
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
}

async fn verify_blocking(password: String, digest: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || password::verify(&password, &digest))
        .await
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
}
