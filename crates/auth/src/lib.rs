//! `ballerbio-auth` — credentials, password hashing, and bearer tokens.
//!
//! Decoupled from HTTP and from any concrete store: persistence is reached
//! through [`CredentialStore`], the signing secret is injected at construction.

pub mod claims;
pub mod password;
pub mod service;
pub mod store;
pub mod token;
pub mod user;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use password::PasswordError;
pub use service::{AuthError, AuthService, LoginOutcome};
pub use store::CredentialStore;
pub use token::{Hs256Jwt, IssuedToken, JwtIssuer, JwtValidator, TokenError};
pub use user::{LoginUser, NewUser, RegisterUser, User};
