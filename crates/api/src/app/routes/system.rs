use axum::{extract::Extension, http::StatusCode, Json};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> Json<PrincipalContext> {
    Json(principal)
}
