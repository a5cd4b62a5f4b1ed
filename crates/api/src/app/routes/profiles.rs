use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use ballerbio_core::ProfileId;
use ballerbio_profiles::{CreateProfile, Profile, ProfileDetails, Skill};

use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Read-only profile endpoints.
pub fn public_router() -> Router {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/:id/:slug", get(get_profile))
        .route("/skills/:id", get(list_skills))
}

pub fn protected_router() -> Router {
    Router::new().route("/profiles/create", post(create_profile))
}

pub async fn create_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    JsonBody(body): JsonBody<CreateProfile>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    tracing::debug!(caller = %principal.user_id(), "create profile");
    let profile = services.profiles.create_profile(body).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn list_profiles(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<ProfileDetails>>, ApiError> {
    Ok(Json(services.profiles.list_profiles().await?))
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, slug)): Path<(String, String)>,
) -> Result<Json<ProfileDetails>, ApiError> {
    let id: ProfileId = id.parse()?;
    Ok(Json(services.profiles.profile_by_slug(id, &slug).await?))
}

pub async fn list_skills(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Skill>>, ApiError> {
    let id: ProfileId = id.parse()?;
    Ok(Json(services.profiles.skills(id).await?))
}
