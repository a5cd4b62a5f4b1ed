//! Athlete profiles and everything hanging off them.
//!
//! This crate owns the profile and child-record models, the write inputs with
//! their field rules, the parent-existence checks that gate every write, and
//! the repository contract that storage adapters implement.

pub mod error;
pub mod input;
pub mod integrity;
pub mod model;
pub mod repository;
pub mod service;

pub use error::ProfileError;
pub use input::{
    AddAchievement, AddChild, AddClubProfile, AddInjury, AddSeasonStat, AddSkill, AddSocialLink,
    CreateProfile, Validate,
};
pub use integrity::{ParentLookup, ensure_profile, ensure_user};
pub use model::{
    Achievement, AchievementData, ClubProfile, ClubProfileData, ContractType, Injury, InjuryData,
    NewAchievement, NewClubProfile, NewInjury, NewProfile, NewRecord, NewSeasonStat, NewSkill,
    NewSocialLink, Profile, ProfileDetails, Record, SeasonStat, SeasonStatData, Skill, SkillData,
    SocialLink, SocialLinkData,
};
pub use repository::ProfileRepository;
pub use service::ProfileService;
