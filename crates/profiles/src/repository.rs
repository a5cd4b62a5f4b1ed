use async_trait::async_trait;

use ballerbio_core::{ProfileId, StoreResult};

use crate::integrity::ParentLookup;
use crate::model::{
    Achievement, ClubProfile, Injury, NewAchievement, NewClubProfile, NewInjury, NewProfile,
    NewSeasonStat, NewSkill, NewSocialLink, Profile, ProfileDetails, SeasonStat, Skill, SocialLink,
};

/// Profile persistence.
///
/// Inserts assume the parent check already passed, but implementations still
/// enforce foreign keys (`ForeignKeyViolation`) and one profile per user
/// (`UniqueViolation`).
#[async_trait]
pub trait ProfileRepository: ParentLookup {
    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile>;

    async fn insert_skill(&self, row: NewSkill) -> StoreResult<Skill>;
    async fn insert_achievement(&self, row: NewAchievement) -> StoreResult<Achievement>;
    async fn insert_injury(&self, row: NewInjury) -> StoreResult<Injury>;
    async fn insert_social_link(&self, row: NewSocialLink) -> StoreResult<SocialLink>;
    async fn insert_club_profile(&self, row: NewClubProfile) -> StoreResult<ClubProfile>;
    async fn insert_season_stat(&self, row: NewSeasonStat) -> StoreResult<SeasonStat>;

    async fn find_profile(&self, id: ProfileId) -> StoreResult<Option<Profile>>;

    /// Every profile, expanded. Ordered by id.
    async fn list_profiles(&self) -> StoreResult<Vec<ProfileDetails>>;

    /// Matches on both id and slug.
    async fn find_profile_by_slug(
        &self,
        id: ProfileId,
        slug: &str,
    ) -> StoreResult<Option<ProfileDetails>>;

    async fn skills_for_profile(&self, profile_id: ProfileId) -> StoreResult<Vec<Skill>>;
}
