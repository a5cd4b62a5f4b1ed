//! In-memory store for tests/dev.
//!
//! Enforces the same constraints as the relational schema: unique email and
//! username, one profile per user, and foreign keys on every parent reference.
//! Reads skip soft-deleted rows; constraints still see them.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use ballerbio_auth::{CredentialStore, NewUser, User};
use ballerbio_core::{
    Email, Entity, ProfileId, RecordId, StoreError, StoreResult, Timestamps, UserId,
};
use ballerbio_profiles::{
    Achievement, AchievementData, ClubProfile, ClubProfileData, Injury, InjuryData, NewAchievement,
    NewClubProfile, NewInjury, NewProfile, NewRecord, NewSeasonStat, NewSkill, NewSocialLink,
    ParentLookup, Profile, ProfileDetails, ProfileRepository, Record, SeasonStat, SeasonStatData,
    Skill, SkillData, SocialLink, SocialLinkData,
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T: Entity> Table<T> {
    fn live(&self, id: i64) -> Option<&T> {
        self.rows.get(&id).filter(|row| !row.is_deleted())
    }

    fn live_rows(&self) -> impl Iterator<Item = &T> {
        self.rows.values().filter(|row| !row.is_deleted())
    }
}

impl<T: Clone> Table<Record<T>> {
    fn for_profile(&self, profile_id: ProfileId) -> Vec<Record<T>> {
        self.live_rows()
            .filter(|r| r.profile_id == profile_id)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<User>,
    profiles: Table<Profile>,
    skills: Table<Skill>,
    achievements: Table<Achievement>,
    injuries: Table<Injury>,
    social_links: Table<SocialLink>,
    club_profiles: Table<ClubProfile>,
    season_stats: Table<SeasonStat>,
}

impl Tables {
    fn details(&self, profile: &Profile) -> StoreResult<ProfileDetails> {
        let user = self
            .users
            .rows
            .get(&profile.user_id.get())
            .cloned()
            .ok_or_else(|| {
                StoreError::persistence(format!("profile {} references missing user", profile.id))
            })?;

        let id = profile.id;
        Ok(ProfileDetails {
            skills: self.skills.for_profile(id),
            achievements: self.achievements.for_profile(id),
            injuries: self.injuries.for_profile(id),
            social_links: self.social_links.for_profile(id),
            club_profiles: self.club_profiles.for_profile(id),
            season_stats: self.season_stats.for_profile(id),
            ..ProfileDetails::bare(profile.clone(), user)
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::persistence("in-memory store lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::persistence("in-memory store lock poisoned"))
    }

    /// Insert a child row after checking its profile under the same lock.
    fn insert_child<T: Clone>(
        &self,
        table: fn(&mut Tables) -> &mut Table<Record<T>>,
        constraint: &str,
        row: NewRecord<T>,
    ) -> StoreResult<Record<T>> {
        let mut tables = self.write()?;
        if !tables.profiles.rows.contains_key(&row.profile_id.get()) {
            return Err(StoreError::ForeignKeyViolation(constraint.to_string()));
        }

        let table = table(&mut *tables);
        let id = table.allocate();
        let record = row.into_record(RecordId::new(id), Timestamps::created(Utc::now()));
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    /// Number of stored skills across all profiles.
    pub fn skill_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.skills.rows.len())
    }

    pub fn user_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.users.rows.len())
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.write()?;
        if tables.users.rows.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".into()));
        }
        if tables.users.rows.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation("users_username_key".into()));
        }

        let id = tables.users.allocate();
        let created = User {
            id: UserId::new(id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            timestamps: Timestamps::created(Utc::now()),
        };
        tables.users.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.live_rows().find(|u| &u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.live(id.get()).cloned())
    }
}

#[async_trait]
impl ParentLookup for InMemoryStore {
    async fn user_exists(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.read()?.users.live(id.get()).is_some())
    }

    async fn profile_exists(&self, id: ProfileId) -> StoreResult<bool> {
        Ok(self.read()?.profiles.live(id.get()).is_some())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        let mut tables = self.write()?;
        if !tables.users.rows.contains_key(&profile.user_id.get()) {
            return Err(StoreError::ForeignKeyViolation("profiles_user_id_fkey".into()));
        }
        if tables.profiles.rows.values().any(|p| p.user_id == profile.user_id) {
            return Err(StoreError::UniqueViolation("profiles_user_id_key".into()));
        }

        let id = tables.profiles.allocate();
        let created = Profile {
            id: ProfileId::new(id),
            user_id: profile.user_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            dob: profile.dob,
            position: profile.position,
            height: profile.height,
            weight: profile.weight,
            bio: profile.bio,
            location: profile.location,
            nationality: profile.nationality,
            slug: profile.slug,
            timestamps: Timestamps::created(Utc::now()),
        };
        tables.profiles.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn insert_skill(&self, row: NewSkill) -> StoreResult<Skill> {
        self.insert_child::<SkillData>(|t| &mut t.skills, "skills_profile_id_fkey", row)
    }

    async fn insert_achievement(&self, row: NewAchievement) -> StoreResult<Achievement> {
        self.insert_child::<AchievementData>(
            |t| &mut t.achievements,
            "achievements_profile_id_fkey",
            row,
        )
    }

    async fn insert_injury(&self, row: NewInjury) -> StoreResult<Injury> {
        self.insert_child::<InjuryData>(|t| &mut t.injuries, "injuries_profile_id_fkey", row)
    }

    async fn insert_social_link(&self, row: NewSocialLink) -> StoreResult<SocialLink> {
        self.insert_child::<SocialLinkData>(
            |t| &mut t.social_links,
            "social_links_profile_id_fkey",
            row,
        )
    }

    async fn insert_club_profile(&self, row: NewClubProfile) -> StoreResult<ClubProfile> {
        self.insert_child::<ClubProfileData>(
            |t| &mut t.club_profiles,
            "club_profiles_profile_id_fkey",
            row,
        )
    }

    async fn insert_season_stat(&self, row: NewSeasonStat) -> StoreResult<SeasonStat> {
        self.insert_child::<SeasonStatData>(
            |t| &mut t.season_stats,
            "season_stats_profile_id_fkey",
            row,
        )
    }

    async fn find_profile(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        Ok(self.read()?.profiles.live(id.get()).cloned())
    }

    async fn list_profiles(&self) -> StoreResult<Vec<ProfileDetails>> {
        let tables = self.read()?;
        tables
            .profiles
            .live_rows()
            .map(|p| tables.details(p))
            .collect()
    }

    async fn find_profile_by_slug(
        &self,
        id: ProfileId,
        slug: &str,
    ) -> StoreResult<Option<ProfileDetails>> {
        let tables = self.read()?;
        match tables.profiles.live(id.get()) {
            Some(profile) if profile.slug.as_str() == slug => tables.details(profile).map(Some),
            _ => Ok(None),
        }
    }

    async fn skills_for_profile(&self, profile_id: ProfileId) -> StoreResult<Vec<Skill>> {
        Ok(self.read()?.skills.for_profile(profile_id))
    }
}
