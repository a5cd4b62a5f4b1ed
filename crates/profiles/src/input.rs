//! Write inputs as they arrive on the wire, and their field rules.
//!
//! Parent references are kept as raw `Option<i64>` here; turning them into
//! typed ids is the integrity checker's job.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use ballerbio_core::{DomainError, DomainResult};

use crate::model::{
    AchievementData, ClubProfileData, InjuryData, SeasonStatData, SkillData, SocialLinkData,
};

/// Field-level rules for an input payload.
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

fn required(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn required_bounded(field: &str, value: &str, max: usize) -> DomainResult<()> {
    required(field, value)?;
    max_len(field, value, max)
}

fn required_date(field: &str, value: Option<DateTime<Utc>>) -> DomainResult<DateTime<Utc>> {
    value.ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

fn not_before(
    field: &str,
    end: Option<DateTime<Utc>>,
    start_field: &str,
    start: DateTime<Utc>,
) -> DomainResult<()> {
    match end {
        Some(end) if end < start => Err(DomainError::validation(format!(
            "{field} must not be before {start_field}"
        ))),
        _ => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub nationality: String,
}

impl Validate for CreateProfile {
    fn validate(&self) -> DomainResult<()> {
        required("first_name", &self.first_name)?;
        required("last_name", &self.last_name)?;
        required_date("dob", self.dob)?;
        required("position", &self.position)?;
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(DomainError::validation("height must be a positive number"));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(DomainError::validation("weight must be a positive number"));
        }
        required("bio", &self.bio)?;
        required("location", &self.location)?;
        required("nationality", &self.nationality)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Child records
// ─────────────────────────────────────────────────────────────────────────────

/// A child-record write: the declared parent plus the record payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AddChild<T> {
    #[serde(default)]
    pub profile_id: Option<i64>,
    #[serde(flatten)]
    pub data: T,
}

pub type AddSkill = AddChild<SkillData>;
pub type AddAchievement = AddChild<AchievementData>;
pub type AddInjury = AddChild<InjuryData>;
pub type AddSocialLink = AddChild<SocialLinkData>;
pub type AddClubProfile = AddChild<ClubProfileData>;
pub type AddSeasonStat = AddChild<SeasonStatData>;

impl Validate for SkillData {
    fn validate(&self) -> DomainResult<()> {
        required("skill_name", &self.skill_name)?;
        required("level", &self.level)
    }
}

impl Validate for AchievementData {
    fn validate(&self) -> DomainResult<()> {
        required_bounded("title", &self.title, 100)?;
        required("description", &self.description)?;
        required_date("date_achieved", self.date_achieved)?;
        Ok(())
    }
}

impl Validate for InjuryData {
    fn validate(&self) -> DomainResult<()> {
        required_bounded("injury_type", &self.injury_type, 100)?;
        required("description", &self.description)?;
        let start = required_date("start_date", self.start_date)?;
        not_before("end_date", self.end_date, "start_date", start)
    }
}

impl Validate for SocialLinkData {
    fn validate(&self) -> DomainResult<()> {
        required_bounded("platform", &self.platform, 50)?;
        required_bounded("url", &self.url, 200)
    }
}

impl Validate for ClubProfileData {
    fn validate(&self) -> DomainResult<()> {
        required_bounded("club_name", &self.club_name, 100)?;
        required_bounded("club_league", &self.club_league, 100)?;
        required_bounded("club_country", &self.club_country, 100)?;
        let start = required_date("start_year", self.start_year)?;
        not_before("end_year", self.end_year, "start_year", start)
    }
}

impl Validate for SeasonStatData {
    fn validate(&self) -> DomainResult<()> {
        required_bounded("season", &self.season, 20)?;
        required_bounded("club_name", &self.club_name, 100)?;
        required_bounded("league_name", &self.league_name, 100)
    }
}
