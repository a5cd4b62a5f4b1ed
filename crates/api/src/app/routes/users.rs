use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use ballerbio_auth::{LoginUser, RegisterUser, User};
use ballerbio_core::UserId;

use crate::app::dto::LoginResponse;
use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/users/create", post(create_user))
        .route("/users/login", post(login))
        .route("/users/:id", get(get_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = services.auth.register(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<LoginUser>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = services.auth.login(body, Utc::now()).await?;
    Ok(Json(outcome.into()))
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = id.parse()?;
    Ok(Json(services.auth.user(id).await?))
}
