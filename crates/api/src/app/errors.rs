use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use ballerbio_auth::AuthError;
use ballerbio_core::DomainError;
use ballerbio_profiles::ProfileError;

/// Every failure a handler or the auth middleware can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body could not be decoded.
    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Unauthenticated(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(e)
            | ApiError::Auth(AuthError::Domain(e))
            | ApiError::Profile(ProfileError::Domain(e)) => domain_error_to_response(e),

            ApiError::Auth(AuthError::DuplicateEmail) => {
                json_error(StatusCode::BAD_REQUEST, "duplicate_email", AuthError::DuplicateEmail.to_string())
            }
            ApiError::Auth(AuthError::DuplicateUsername) => json_error(
                StatusCode::BAD_REQUEST,
                "duplicate_username",
                AuthError::DuplicateUsername.to_string(),
            ),
            ApiError::Auth(AuthError::InvalidCredentials) => json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                AuthError::InvalidCredentials.to_string(),
            ),
            ApiError::Profile(e @ ProfileError::ProfileExists(_)) => {
                json_error(StatusCode::BAD_REQUEST, "profile_exists", e.to_string())
            }
            ApiError::InvalidBody(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_body", msg),
            ApiError::Unauthenticated(msg) => {
                json_error(StatusCode::UNAUTHORIZED, "unauthenticated", msg)
            }

            // Hashing, signing and storage failures: log details, return a generic message.
            ApiError::Auth(e) => internal(&e),
            ApiError::Profile(e) => internal(&e),
        }
    }
}

fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        e @ DomainError::ParentNotFound { .. } => {
            json_error(StatusCode::BAD_REQUEST, "parent_not_found", e.to_string())
        }
    }
}

fn internal(err: &dyn std::error::Error) -> Response {
    tracing::error!(error = %err, "request failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal server error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use ballerbio_core::StoreError;

    use super::*;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(status(DomainError::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status(DomainError::invalid_id("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status(DomainError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(DomainError::parent_not_found("profile", 9)), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::DuplicateEmail), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::DuplicateUsername), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(AuthError::Domain(DomainError::validation("email is required"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ApiError::Unauthenticated("missing")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(ProfileError::Store(StoreError::persistence("pool closed"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(AuthError::Store(StoreError::persistence("pool closed"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
