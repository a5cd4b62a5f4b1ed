//! Stored profile and child-record shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ballerbio_auth::User;
use ballerbio_core::{Entity, ProfileId, RecordId, Slug, Timestamps, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

/// A player profile, one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub dob: DateTime<Utc>,
    pub position: String,
    pub height: f64,
    pub weight: f64,
    pub bio: String,
    pub location: String,
    pub nationality: String,
    pub slug: Slug,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Entity for Profile {
    type Id = ProfileId;

    fn id(&self) -> ProfileId {
        self.id
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

/// Validated profile row; the slug is already derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub dob: DateTime<Utc>,
    pub position: String,
    pub height: f64,
    pub weight: f64,
    pub bio: String,
    pub location: String,
    pub nationality: String,
    pub slug: Slug,
}

/// A profile with its owner and every child collection expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDetails {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: User,
    pub skills: Vec<Skill>,
    pub achievements: Vec<Achievement>,
    pub injuries: Vec<Injury>,
    pub social_links: Vec<SocialLink>,
    pub club_profiles: Vec<ClubProfile>,
    pub season_stats: Vec<SeasonStat>,
}

impl ProfileDetails {
    /// Details with empty child collections.
    pub fn bare(profile: Profile, user: User) -> Self {
        Self {
            profile,
            user,
            skills: Vec::new(),
            achievements: Vec::new(),
            injuries: Vec::new(),
            social_links: Vec::new(),
            club_profiles: Vec::new(),
            season_stats: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Child records
// ─────────────────────────────────────────────────────────────────────────────

/// A stored child row: identity, owning profile, payload, timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: RecordId,
    pub profile_id: ProfileId,
    #[serde(flatten)]
    pub data: T,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl<T> Entity for Record<T> {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}

/// A child row that passed validation and the parent check.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord<T> {
    pub profile_id: ProfileId,
    pub data: T,
}

impl<T> NewRecord<T> {
    /// Attach store-assigned identity.
    pub fn into_record(self, id: RecordId, timestamps: Timestamps) -> Record<T> {
        Record {
            id,
            profile_id: self.profile_id,
            data: self.data,
            timestamps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(default)]
    pub skill_name: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_achieved: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryData {
    #[serde(default)]
    pub injury_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinkData {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub url: String,
}

/// Terms under which a player is (or was) registered with a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    Permanent,
    Loan,
    Trial,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permanent => "Permanent",
            Self::Loan => "Loan",
            Self::Trial => "Trial",
        }
    }
}

impl core::fmt::Display for ContractType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Permanent" => Ok(Self::Permanent),
            "Loan" => Ok(Self::Loan),
            "Trial" => Ok(Self::Trial),
            other => Err(format!("unknown contract type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubProfileData {
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub club_league: String,
    #[serde(default)]
    pub club_country: String,
    #[serde(default)]
    pub start_year: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_year: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_present_club: bool,
    #[serde(default)]
    pub club_appearances: Option<i32>,
    #[serde(default)]
    pub club_goals: Option<i32>,
    #[serde(default)]
    pub club_assists: Option<i32>,
    #[serde(default)]
    pub contract_type: ContractType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStatData {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub league_name: String,
    #[serde(default)]
    pub appearances: Option<i32>,
    #[serde(default)]
    pub goals: Option<i32>,
    #[serde(default)]
    pub assists: Option<i32>,
    #[serde(default)]
    pub minutes_played: Option<i32>,
    #[serde(default)]
    pub yellow_cards: Option<i32>,
    #[serde(default)]
    pub red_cards: Option<i32>,
}

pub type Skill = Record<SkillData>;
pub type Achievement = Record<AchievementData>;
pub type Injury = Record<InjuryData>;
pub type SocialLink = Record<SocialLinkData>;
pub type ClubProfile = Record<ClubProfileData>;
pub type SeasonStat = Record<SeasonStatData>;

pub type NewSkill = NewRecord<SkillData>;
pub type NewAchievement = NewRecord<AchievementData>;
pub type NewInjury = NewRecord<InjuryData>;
pub type NewSocialLink = NewRecord<SocialLinkData>;
pub type NewClubProfile = NewRecord<ClubProfileData>;
pub type NewSeasonStat = NewRecord<SeasonStatData>;
