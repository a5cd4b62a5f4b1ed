//! Postgres-backed store.
//!
//! ## Error Mapping
//!
//! | PostgreSQL Error Code | StoreError | Scenario |
//! |-----------------------|------------|----------|
//! | `23505` | `UniqueViolation(constraint)` | Email, username or profile-per-user taken |
//! | `23503` | `ForeignKeyViolation(constraint)` | Parent row missing at insert time |
//! | Any other / non-database | `Persistence` | Connection, decode, pool errors |
//!
//! Constraint names are stable (see `schema.sql`) so callers can tell an
//! email collision from a username collision.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::instrument;

use ballerbio_auth::{CredentialStore, NewUser, User};
use ballerbio_core::{
    Email, ProfileId, RecordId, Slug, StoreError, StoreResult, Timestamps, UserId,
};
use ballerbio_profiles::{
    Achievement, AchievementData, ClubProfile, ClubProfileData, ContractType, Injury, InjuryData,
    NewAchievement, NewClubProfile, NewInjury, NewProfile, NewSeasonStat, NewSkill, NewSocialLink,
    ParentLookup, Profile, ProfileDetails, ProfileRepository, Record, SeasonStat, SeasonStatData,
    Skill, SkillData, SocialLink, SocialLinkData,
};

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bootstrap the schema.
    #[instrument(skip_all, err)]
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("failed to connect to Postgres")?;

        let store = Self::new(pool);
        store.bootstrap().await.context("schema bootstrap failed")?;
        Ok(store)
    }

    /// Create any missing tables and indexes.
    pub async fn bootstrap(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("bootstrap", e))?;
        Ok(())
    }

    async fn children_of<T: ChildRow>(&self, profile_ids: &[i64]) -> StoreResult<Vec<Record<T>>> {
        let sql = format!(
            "SELECT * FROM {} WHERE profile_id = ANY($1) AND deleted_at IS NULL ORDER BY id",
            T::TABLE
        );
        let rows = sqlx::query(&sql)
            .bind(profile_ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(T::TABLE, e))?;

        rows.iter()
            .map(record_from_row::<T>)
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error(T::TABLE, e))
    }

    /// Load owners and child collections for a batch of profiles.
    async fn expand(&self, profiles: Vec<Profile>) -> StoreResult<Vec<ProfileDetails>> {
        if profiles.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = profiles.iter().map(|p| p.id.get()).collect();
        let user_ids: Vec<i64> = profiles.iter().map(|p| p.user_id.get()).collect();

        let users: HashMap<UserId, User> = sqlx::query("SELECT * FROM users WHERE id = ANY($1)")
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("expand_users", e))?
            .iter()
            .map(|row| user_from_row(row).map(|u| (u.id, u)))
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error("expand_users", e))?;

        let mut skills = by_profile(self.children_of::<SkillData>(&ids).await?);
        let mut achievements = by_profile(self.children_of::<AchievementData>(&ids).await?);
        let mut injuries = by_profile(self.children_of::<InjuryData>(&ids).await?);
        let mut social_links = by_profile(self.children_of::<SocialLinkData>(&ids).await?);
        let mut club_profiles = by_profile(self.children_of::<ClubProfileData>(&ids).await?);
        let mut season_stats = by_profile(self.children_of::<SeasonStatData>(&ids).await?);

        profiles
            .into_iter()
            .map(|profile| {
                let user = users.get(&profile.user_id).cloned().ok_or_else(|| {
                    StoreError::persistence(format!(
                        "profile {} references missing user {}",
                        profile.id, profile.user_id
                    ))
                })?;
                let id = profile.id;
                Ok(ProfileDetails {
                    skills: skills.remove(&id).unwrap_or_default(),
                    achievements: achievements.remove(&id).unwrap_or_default(),
                    injuries: injuries.remove(&id).unwrap_or_default(),
                    social_links: social_links.remove(&id).unwrap_or_default(),
                    club_profiles: club_profiles.remove(&id).unwrap_or_default(),
                    season_stats: season_stats.remove(&id).unwrap_or_default(),
                    ..ProfileDetails::bare(profile, user)
                })
            })
            .collect()
    }

    async fn exists(&self, sql: &str, id: i64) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists", e))
    }
}

#[async_trait]
impl CredentialStore for PostgresStore {
    #[instrument(skip(self, user), fields(username = %user.username), err)]
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;

        user_from_row(&row).map_err(|e| map_sqlx_error("create_user", e))
    }

    #[instrument(skip(self, email), err)]
    async fn find_user_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        sqlx::query("SELECT * FROM users WHERE email = $1 AND deleted_at IS NULL")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_email", e))?
            .map(|row| user_from_row(&row))
            .transpose()
            .map_err(|e| map_sqlx_error("find_user_by_email", e))
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        sqlx::query("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_id", e))?
            .map(|row| user_from_row(&row))
            .transpose()
            .map_err(|e| map_sqlx_error("find_user_by_id", e))
    }
}

#[async_trait]
impl ParentLookup for PostgresStore {
    async fn user_exists(&self, id: UserId) -> StoreResult<bool> {
        self.exists(
            "SELECT EXISTS (SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)",
            id.get(),
        )
        .await
    }

    async fn profile_exists(&self, id: ProfileId) -> StoreResult<bool> {
        self.exists(
            "SELECT EXISTS (SELECT 1 FROM profiles WHERE id = $1 AND deleted_at IS NULL)",
            id.get(),
        )
        .await
    }
}

#[async_trait]
impl ProfileRepository for PostgresStore {
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id), err)]
    async fn create_profile(&self, profile: NewProfile) -> StoreResult<Profile> {
        let row = sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, first_name, last_name, dob, position,
                height, weight, bio, location, nationality, slug
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(profile.user_id.get())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.dob)
        .bind(&profile.position)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(&profile.nationality)
        .bind(profile.slug.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_profile", e))?;

        profile_from_row(&row).map_err(|e| map_sqlx_error("create_profile", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_skill(&self, row: NewSkill) -> StoreResult<Skill> {
        let inserted = sqlx::query(
            "INSERT INTO skills (profile_id, skill_name, level) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(row.profile_id.get())
        .bind(&row.data.skill_name)
        .bind(&row.data.level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_skill", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_skill", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_achievement(&self, row: NewAchievement) -> StoreResult<Achievement> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO achievements (profile_id, title, description, date_achieved)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(row.profile_id.get())
        .bind(&row.data.title)
        .bind(&row.data.description)
        .bind(row.data.date_achieved)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_achievement", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_achievement", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_injury(&self, row: NewInjury) -> StoreResult<Injury> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO injuries (profile_id, injury_type, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(row.profile_id.get())
        .bind(&row.data.injury_type)
        .bind(&row.data.description)
        .bind(row.data.start_date)
        .bind(row.data.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_injury", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_injury", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_social_link(&self, row: NewSocialLink) -> StoreResult<SocialLink> {
        let inserted = sqlx::query(
            "INSERT INTO social_links (profile_id, platform, url) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(row.profile_id.get())
        .bind(&row.data.platform)
        .bind(&row.data.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_social_link", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_social_link", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_club_profile(&self, row: NewClubProfile) -> StoreResult<ClubProfile> {
        let data = &row.data;
        let inserted = sqlx::query(
            r#"
            INSERT INTO club_profiles (
                profile_id, club_name, club_league, club_country, start_year, end_year,
                is_present_club, club_appearances, club_goals, club_assists, contract_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.profile_id.get())
        .bind(&data.club_name)
        .bind(&data.club_league)
        .bind(&data.club_country)
        .bind(data.start_year)
        .bind(data.end_year)
        .bind(data.is_present_club)
        .bind(data.club_appearances)
        .bind(data.club_goals)
        .bind(data.club_assists)
        .bind(data.contract_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_club_profile", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_club_profile", e))
    }

    #[instrument(skip(self, row), fields(profile_id = %row.profile_id), err)]
    async fn insert_season_stat(&self, row: NewSeasonStat) -> StoreResult<SeasonStat> {
        let data = &row.data;
        let inserted = sqlx::query(
            r#"
            INSERT INTO season_stats (
                profile_id, season, club_name, league_name, appearances, goals,
                assists, minutes_played, yellow_cards, red_cards
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(row.profile_id.get())
        .bind(&data.season)
        .bind(&data.club_name)
        .bind(&data.league_name)
        .bind(data.appearances)
        .bind(data.goals)
        .bind(data.assists)
        .bind(data.minutes_played)
        .bind(data.yellow_cards)
        .bind(data.red_cards)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_season_stat", e))?;

        record_from_row(&inserted).map_err(|e| map_sqlx_error("insert_season_stat", e))
    }

    #[instrument(skip(self), fields(profile_id = %id), err)]
    async fn find_profile(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        sqlx::query("SELECT * FROM profiles WHERE id = $1 AND deleted_at IS NULL")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_profile", e))?
            .map(|row| profile_from_row(&row))
            .transpose()
            .map_err(|e| map_sqlx_error("find_profile", e))
    }

    #[instrument(skip(self), err)]
    async fn list_profiles(&self) -> StoreResult<Vec<ProfileDetails>> {
        let profiles = sqlx::query("SELECT * FROM profiles WHERE deleted_at IS NULL ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_profiles", e))?
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_profiles", e))?;

        self.expand(profiles).await
    }

    #[instrument(skip(self), fields(profile_id = %id), err)]
    async fn find_profile_by_slug(
        &self,
        id: ProfileId,
        slug: &str,
    ) -> StoreResult<Option<ProfileDetails>> {
        let profile = sqlx::query(
            "SELECT * FROM profiles WHERE id = $1 AND slug = $2 AND deleted_at IS NULL",
        )
        .bind(id.get())
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_profile_by_slug", e))?
        .map(|row| profile_from_row(&row))
        .transpose()
        .map_err(|e| map_sqlx_error("find_profile_by_slug", e))?;

        match profile {
            Some(profile) => Ok(self.expand(vec![profile]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(profile_id = %profile_id), err)]
    async fn skills_for_profile(&self, profile_id: ProfileId) -> StoreResult<Vec<Skill>> {
        self.children_of::<SkillData>(&[profile_id.get()]).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Row decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of a child table: which table it lives in, how to read its columns.
trait ChildRow: Sized + Send + Sync + 'static {
    const TABLE: &'static str;

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error>;
}

impl ChildRow for SkillData {
    const TABLE: &'static str = "skills";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            skill_name: row.try_get("skill_name")?,
            level: row.try_get("level")?,
        })
    }
}

impl ChildRow for AchievementData {
    const TABLE: &'static str = "achievements";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date_achieved: row.try_get("date_achieved")?,
        })
    }
}

impl ChildRow for InjuryData {
    const TABLE: &'static str = "injuries";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            injury_type: row.try_get("injury_type")?,
            description: row.try_get("description")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        })
    }
}

impl ChildRow for SocialLinkData {
    const TABLE: &'static str = "social_links";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            platform: row.try_get("platform")?,
            url: row.try_get("url")?,
        })
    }
}

impl ChildRow for ClubProfileData {
    const TABLE: &'static str = "club_profiles";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        let contract_type = row
            .try_get::<String, _>("contract_type")?
            .parse::<ContractType>()
            .map_err(decode_error)?;

        Ok(Self {
            club_name: row.try_get("club_name")?,
            club_league: row.try_get("club_league")?,
            club_country: row.try_get("club_country")?,
            start_year: row.try_get("start_year")?,
            end_year: row.try_get("end_year")?,
            is_present_club: row.try_get("is_present_club")?,
            club_appearances: row.try_get("club_appearances")?,
            club_goals: row.try_get("club_goals")?,
            club_assists: row.try_get("club_assists")?,
            contract_type,
        })
    }
}

impl ChildRow for SeasonStatData {
    const TABLE: &'static str = "season_stats";

    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            season: row.try_get("season")?,
            club_name: row.try_get("club_name")?,
            league_name: row.try_get("league_name")?,
            appearances: row.try_get("appearances")?,
            goals: row.try_get("goals")?,
            assists: row.try_get("assists")?,
            minutes_played: row.try_get("minutes_played")?,
            yellow_cards: row.try_get("yellow_cards")?,
            red_cards: row.try_get("red_cards")?,
        })
    }
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    sqlx::Error::Decode(err.into())
}

fn timestamps_from_row(row: &PgRow) -> Result<Timestamps, sqlx::Error> {
    Ok(Timestamps {
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        deleted_at: row.try_get::<Option<DateTime<Utc>>, _>("deleted_at")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    let email = Email::parse(&row.try_get::<String, _>("email")?).map_err(decode_error)?;
    Ok(User {
        id: UserId::new(row.try_get("id")?),
        username: row.try_get("username")?,
        email,
        password_hash: row.try_get("password_hash")?,
        timestamps: timestamps_from_row(row)?,
    })
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: ProfileId::new(row.try_get("id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        dob: row.try_get("dob")?,
        position: row.try_get("position")?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        bio: row.try_get("bio")?,
        location: row.try_get("location")?,
        nationality: row.try_get("nationality")?,
        slug: Slug::from_stored(row.try_get::<String, _>("slug")?),
        timestamps: timestamps_from_row(row)?,
    })
}

fn record_from_row<T: ChildRow>(row: &PgRow) -> Result<Record<T>, sqlx::Error> {
    Ok(Record {
        id: RecordId::new(row.try_get("id")?),
        profile_id: ProfileId::new(row.try_get("profile_id")?),
        data: T::decode(row)?,
        timestamps: timestamps_from_row(row)?,
    })
}

fn by_profile<T>(records: Vec<Record<T>>) -> HashMap<ProfileId, Vec<Record<T>>> {
    let mut grouped: HashMap<ProfileId, Vec<Record<T>>> = HashMap::new();
    for record in records {
        grouped.entry(record.profile_id).or_default().push(record);
    }
    grouped
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err
                .constraint()
                .map(str::to_owned)
                .unwrap_or_else(|| db_err.message().to_owned());

            match db_err.code().as_deref() {
                Some("23505") => StoreError::UniqueViolation(constraint),
                Some("23503") => StoreError::ForeignKeyViolation(constraint),
                _ => StoreError::Persistence(format!(
                    "database error in {}: {}",
                    operation,
                    db_err.message()
                )),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Persistence(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Persistence(format!("sqlx error in {}: {}", operation, err)),
    }
}
