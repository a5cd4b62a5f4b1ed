//! HS256 bearer tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use ballerbio_core::UserId;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, or not a JWT at all.
    #[error("token rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// A freshly signed token plus the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: JwtClaims,
}

/// Mints tokens for authenticated users.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError>;
}

/// Verifies a presented token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// HMAC-SHA256 signer/validator over a process-wide secret.
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256Jwt {
    /// Tokens issued by login live for 24 hours.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }
}

impl core::fmt::Debug for Hs256Jwt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Jwt").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl JwtIssuer for Hs256Jwt {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        // Claims travel with whole-second precision.
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let claims = JwtClaims {
            user_id,
            issued_at,
            expires_at: issued_at + self.ttl,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok(IssuedToken { token, claims })
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        // Expiry is checked against the caller's clock in `validate_claims`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Rejected(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Hs256Jwt {
        Hs256Jwt::with_default_ttl(b"test-secret")
    }

    #[test]
    fn issued_token_validates_immediately() {
        let jwt = signer();
        let now = Utc::now();
        let issued = jwt.issue(UserId::new(7), now).unwrap();

        let claims = jwt.validate(&issued.token, now).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.user_id, UserId::new(7));
        assert_eq!(claims.expires_at - claims.issued_at, Duration::hours(24));
    }

    #[test]
    fn token_fails_after_expiry() {
        let jwt = signer();
        let now = Utc::now();
        let issued = jwt.issue(UserId::new(7), now).unwrap();

        let later = issued.claims.expires_at;
        assert_eq!(
            jwt.validate(&issued.token, later),
            Err(TokenError::Claims(TokenValidationError::Expired))
        );
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let now = Utc::now();
        let forged = Hs256Jwt::with_default_ttl(b"other-secret")
            .issue(UserId::new(1), now)
            .unwrap();
        assert!(matches!(signer().validate(&forged.token, now), Err(TokenError::Rejected(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            signer().validate("not.a.jwt", Utc::now()),
            Err(TokenError::Rejected(_))
        ));
    }

    #[test]
    fn debug_output_hides_keys() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("test-secret"));
    }
}
