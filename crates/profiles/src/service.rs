//! Profile writes and reads.
//!
//! Every write runs field validation, then the parent check, then the insert.

use std::sync::Arc;

use ballerbio_core::{DomainError, ProfileId, Slug, StoreError};

use crate::error::ProfileError;
use crate::input::{
    AddAchievement, AddChild, AddClubProfile, AddInjury, AddSeasonStat, AddSkill, AddSocialLink,
    CreateProfile, Validate,
};
use crate::integrity::{ensure_profile, ensure_user};
use crate::model::{
    Achievement, ClubProfile, Injury, NewProfile, NewRecord, Profile, ProfileDetails, SeasonStat,
    Skill, SocialLink,
};
use crate::repository::ProfileRepository;

#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_profile(&self, cmd: CreateProfile) -> Result<Profile, ProfileError> {
        cmd.validate()?;
        let user_id = ensure_user(self.repo.as_ref(), cmd.user_id).await?;
        let dob = cmd
            .dob
            .ok_or_else(|| DomainError::validation("dob is required"))?;

        let row = NewProfile {
            user_id,
            slug: Slug::from_name(&cmd.first_name, &cmd.last_name),
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            dob,
            position: cmd.position,
            height: cmd.height,
            weight: cmd.weight,
            bio: cmd.bio,
            location: cmd.location,
            nationality: cmd.nationality,
        };

        let profile = self.repo.create_profile(row).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => ProfileError::ProfileExists(user_id),
            other => ProfileError::from_write(other, "user", user_id.get()),
        })?;

        tracing::info!(profile_id = %profile.id, user_id = %user_id, slug = %profile.slug, "profile created");
        Ok(profile)
    }

    /// Validate the payload and confirm the parent profile exists.
    async fn admit<T: Validate>(&self, cmd: AddChild<T>) -> Result<NewRecord<T>, ProfileError> {
        cmd.data.validate()?;
        let profile_id = ensure_profile(self.repo.as_ref(), cmd.profile_id).await?;
        Ok(NewRecord {
            profile_id,
            data: cmd.data,
        })
    }

    pub async fn add_skill(&self, cmd: AddSkill) -> Result<Skill, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let skill = self
            .repo
            .insert_skill(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %skill.id, profile_id = parent, "skill added");
        Ok(skill)
    }

    pub async fn add_achievement(&self, cmd: AddAchievement) -> Result<Achievement, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let achievement = self
            .repo
            .insert_achievement(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %achievement.id, profile_id = parent, "achievement added");
        Ok(achievement)
    }

    pub async fn add_injury(&self, cmd: AddInjury) -> Result<Injury, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let injury = self
            .repo
            .insert_injury(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %injury.id, profile_id = parent, "injury added");
        Ok(injury)
    }

    pub async fn add_social_link(&self, cmd: AddSocialLink) -> Result<SocialLink, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let link = self
            .repo
            .insert_social_link(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %link.id, profile_id = parent, "social link added");
        Ok(link)
    }

    pub async fn add_club_profile(&self, cmd: AddClubProfile) -> Result<ClubProfile, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let club = self
            .repo
            .insert_club_profile(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %club.id, profile_id = parent, "club profile added");
        Ok(club)
    }

    pub async fn add_season_stat(&self, cmd: AddSeasonStat) -> Result<SeasonStat, ProfileError> {
        let row = self.admit(cmd).await?;
        let parent = row.profile_id.get();
        let stat = self
            .repo
            .insert_season_stat(row)
            .await
            .map_err(|e| ProfileError::from_write(e, "profile", parent))?;
        tracing::info!(record_id = %stat.id, profile_id = parent, "season stat added");
        Ok(stat)
    }

    pub async fn list_profiles(&self) -> Result<Vec<ProfileDetails>, ProfileError> {
        Ok(self.repo.list_profiles().await?)
    }

    pub async fn profile_by_slug(
        &self,
        id: ProfileId,
        slug: &str,
    ) -> Result<ProfileDetails, ProfileError> {
        self.repo
            .find_profile_by_slug(id, slug)
            .await?
            .ok_or(ProfileError::Domain(DomainError::NotFound))
    }

    /// Skills of one profile; `NotFound` when the profile itself is absent.
    pub async fn skills(&self, profile_id: ProfileId) -> Result<Vec<Skill>, ProfileError> {
        if self.repo.find_profile(profile_id).await?.is_none() {
            return Err(DomainError::NotFound.into());
        }
        Ok(self.repo.skills_for_profile(profile_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::TimeZone;
    use chrono::Utc;

    use ballerbio_core::StoreResult;

    use super::*;
    use crate::integrity::ParentLookup;
    use crate::model::{
        NewAchievement, NewClubProfile, NewInjury, NewSeasonStat, NewSkill, NewSocialLink,
        SeasonStatData, SkillData,
    };

    /// Parent lookups always pass but every write is rejected by the store,
    /// as when the parent is removed between the check and the insert.
    #[derive(Default)]
    struct VanishingParents {
        profile_taken: bool,
    }

    #[async_trait]
    impl ParentLookup for VanishingParents {
        async fn user_exists(&self, _: ballerbio_core::UserId) -> StoreResult<bool> {
            Ok(true)
        }

        async fn profile_exists(&self, _: ProfileId) -> StoreResult<bool> {
            Ok(true)
        }
    }

    fn missing_parent<T>(constraint: &str) -> StoreResult<T> {
        Err(StoreError::ForeignKeyViolation(constraint.to_string()))
    }

    #[async_trait]
    impl ProfileRepository for VanishingParents {
        async fn create_profile(&self, _: NewProfile) -> StoreResult<Profile> {
            if self.profile_taken {
                return Err(StoreError::UniqueViolation("profiles_user_id_key".into()));
            }
            missing_parent("profiles_user_id_fkey")
        }

        async fn insert_skill(&self, _: NewSkill) -> StoreResult<Skill> {
            missing_parent("skills_profile_id_fkey")
        }

        async fn insert_achievement(&self, _: NewAchievement) -> StoreResult<Achievement> {
            missing_parent("achievements_profile_id_fkey")
        }

        async fn insert_injury(&self, _: NewInjury) -> StoreResult<Injury> {
            missing_parent("injuries_profile_id_fkey")
        }

        async fn insert_social_link(&self, _: NewSocialLink) -> StoreResult<SocialLink> {
            missing_parent("social_links_profile_id_fkey")
        }

        async fn insert_club_profile(&self, _: NewClubProfile) -> StoreResult<ClubProfile> {
            missing_parent("club_profiles_profile_id_fkey")
        }

        async fn insert_season_stat(&self, _: NewSeasonStat) -> StoreResult<SeasonStat> {
            missing_parent("season_stats_profile_id_fkey")
        }

        async fn find_profile(&self, _: ProfileId) -> StoreResult<Option<Profile>> {
            Ok(None)
        }

        async fn list_profiles(&self) -> StoreResult<Vec<ProfileDetails>> {
            Ok(Vec::new())
        }

        async fn find_profile_by_slug(
            &self,
            _: ProfileId,
            _: &str,
        ) -> StoreResult<Option<ProfileDetails>> {
            Ok(None)
        }

        async fn skills_for_profile(&self, _: ProfileId) -> StoreResult<Vec<Skill>> {
            Ok(Vec::new())
        }
    }

    fn service(repo: VanishingParents) -> ProfileService {
        ProfileService::new(Arc::new(repo))
    }

    fn create_profile(user_id: i64) -> CreateProfile {
        CreateProfile {
            user_id: Some(user_id),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            dob: Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()),
            position: "Forward".into(),
            height: 1.68,
            weight: 60.0,
            bio: "Quick winger".into(),
            location: "Lisbon".into(),
            nationality: "Portuguese".into(),
        }
    }

    fn assert_parent_not_found(err: ProfileError, parent: &str, id: i64) {
        match err {
            ProfileError::Domain(DomainError::ParentNotFound { parent: p, id: i }) => {
                assert_eq!((p, i), (parent, id));
            }
            other => panic!("expected ParentNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn child_insert_foreign_key_is_parent_not_found() {
        let service = service(VanishingParents::default());

        let skill = AddSkill {
            profile_id: Some(9999),
            data: SkillData {
                skill_name: "Passing".into(),
                level: "Advanced".into(),
            },
        };
        let err = service.add_skill(skill).await.unwrap_err();
        assert_parent_not_found(err, "profile", 9999);

        let stat = AddSeasonStat {
            profile_id: Some(42),
            data: SeasonStatData {
                season: "2023/24".into(),
                club_name: "Benfica".into(),
                league_name: "Liga Portugal".into(),
                appearances: Some(30),
                goals: Some(12),
                assists: None,
                minutes_played: None,
                yellow_cards: None,
                red_cards: None,
            },
        };
        let err = service.add_season_stat(stat).await.unwrap_err();
        assert_parent_not_found(err, "profile", 42);
    }

    #[tokio::test]
    async fn profile_insert_foreign_key_is_parent_not_found() {
        let service = service(VanishingParents::default());
        let err = service.create_profile(create_profile(7)).await.unwrap_err();
        assert_parent_not_found(err, "user", 7);
    }

    #[tokio::test]
    async fn profile_unique_key_is_profile_exists() {
        let service = service(VanishingParents { profile_taken: true });
        let err = service.create_profile(create_profile(7)).await.unwrap_err();
        assert!(matches!(err, ProfileError::ProfileExists(id) if id.get() == 7));
    }

    #[tokio::test]
    async fn skills_of_absent_profile_is_not_found() {
        let service = service(VanishingParents::default());
        let err = service.skills(ProfileId::new(3)).await.unwrap_err();
        assert!(matches!(err, ProfileError::Domain(DomainError::NotFound)));
    }
}
