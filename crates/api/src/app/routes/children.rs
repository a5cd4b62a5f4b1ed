//! Child-record writes. Each one is gated on the referenced profile existing.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, routing::post, Json, Router};

use ballerbio_profiles::{
    Achievement, AddAchievement, AddClubProfile, AddInjury, AddSeasonStat, AddSkill, AddSocialLink,
    ClubProfile, Injury, SeasonStat, Skill, SocialLink,
};

use crate::app::errors::ApiError;
use crate::app::extract::JsonBody;
use crate::app::services::AppServices;

type Created<T> = Result<(StatusCode, Json<T>), ApiError>;

pub fn router() -> Router {
    Router::new()
        .route("/skills/add", post(add_skill))
        .route("/achievements/add", post(add_achievement))
        .route("/injury/add", post(add_injury))
        .route("/sociallink/add", post(add_social_link))
        .route("/clubprofile/add", post(add_club_profile))
        .route("/seasonstats/add", post(add_season_stat))
}

pub async fn add_skill(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddSkill>,
) -> Created<Skill> {
    let skill = services.profiles.add_skill(body).await?;
    Ok((StatusCode::CREATED, Json(skill)))
}

pub async fn add_achievement(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddAchievement>,
) -> Created<Achievement> {
    let achievement = services.profiles.add_achievement(body).await?;
    Ok((StatusCode::CREATED, Json(achievement)))
}

pub async fn add_injury(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddInjury>,
) -> Created<Injury> {
    let injury = services.profiles.add_injury(body).await?;
    Ok((StatusCode::CREATED, Json(injury)))
}

pub async fn add_social_link(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddSocialLink>,
) -> Created<SocialLink> {
    let link = services.profiles.add_social_link(body).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn add_club_profile(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddClubProfile>,
) -> Created<ClubProfile> {
    let club = services.profiles.add_club_profile(body).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

pub async fn add_season_stat(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<AddSeasonStat>,
) -> Created<SeasonStat> {
    let stat = services.profiles.add_season_stat(body).await?;
    Ok((StatusCode::CREATED, Json(stat)))
}
