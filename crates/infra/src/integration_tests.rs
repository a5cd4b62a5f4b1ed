//! Integration tests for the service layer over the in-memory store.
//!
//! Tests: HTTP-shaped input → AuthService / ProfileService → InMemoryStore
//!
//! Verifies:
//! - Registration and login round trip through the store
//! - Parent checks reject writes before anything is persisted
//! - Expanded reads carry every child collection

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use serde_json::json;

    use ballerbio_auth::{
        AuthError, AuthService, Hs256Jwt, JwtValidator, LoginUser, RegisterUser,
    };
    use ballerbio_core::{DomainError, ProfileId, UserId};
    use ballerbio_profiles::{ContractType, ProfileError, ProfileService};

    use crate::store::{InMemoryStore, Stores};

    struct Harness {
        store: Arc<InMemoryStore>,
        jwt: Arc<Hs256Jwt>,
        auth: AuthService,
        profiles: ProfileService,
    }

    fn setup() -> Harness {
        let store = Arc::new(InMemoryStore::new());
        let stores = Stores::shared(store.clone());
        let jwt = Arc::new(Hs256Jwt::with_default_ttl(b"integration-secret"));
        Harness {
            auth: AuthService::new(stores.credentials.clone(), jwt.clone()),
            profiles: ProfileService::new(stores.profiles.clone()),
            store,
            jwt,
        }
    }

    fn register(username: &str, email: &str) -> RegisterUser {
        serde_json::from_value(json!({
            "username": username,
            "password": "secret123",
            "email": email,
        }))
        .unwrap()
    }

    fn profile_body(user_id: i64) -> serde_json::Value {
        json!({
            "user_id": user_id,
            "first_name": "Ana",
            "last_name": "Silva",
            "dob": "2000-05-17T00:00:00Z",
            "position": "Forward",
            "height": 1.68,
            "weight": 60.0,
            "bio": "Quick winger",
            "location": "Lisbon",
            "nationality": "Portuguese"
        })
    }

    async fn ana_with_profile(h: &Harness) -> (UserId, ProfileId) {
        let user = h.auth.register(register("ana", "a@x.com")).await.unwrap();
        let profile = h
            .profiles
            .create_profile(serde_json::from_value(profile_body(user.id.get())).unwrap())
            .await
            .unwrap();
        (user.id, profile.id)
    }

    #[tokio::test]
    async fn register_login_and_token_round_trip() {
        let h = setup();
        let user = h.auth.register(register("ana", "a@x.com")).await.unwrap();
        assert_ne!(user.password_hash, "secret123");

        let now = Utc::now();
        let outcome = h
            .auth
            .login(
                LoginUser {
                    email: "a@x.com".into(),
                    password: "secret123".into(),
                },
                now,
            )
            .await
            .unwrap();

        let claims = h.jwt.validate(&outcome.token, now).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert!(h.jwt.validate(&outcome.token, claims.expires_at + Duration::seconds(1)).is_err());
    }

    #[tokio::test]
    async fn duplicate_email_writes_nothing() {
        let h = setup();
        h.auth.register(register("ana", "a@x.com")).await.unwrap();

        let err = h.auth.register(register("bob", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
        assert_eq!(h.store.user_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn profile_gets_slug_from_name() {
        let h = setup();
        let (user_id, profile_id) = ana_with_profile(&h).await;

        let details = h.profiles.profile_by_slug(profile_id, "ana-silva").await.unwrap();
        assert_eq!(details.profile.user_id, user_id);
        assert_eq!(details.user.username, "ana");
    }

    #[tokio::test]
    async fn profile_for_unknown_user_is_rejected() {
        let h = setup();
        let err = h
            .profiles
            .create_profile(serde_json::from_value(profile_body(77)).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Domain(DomainError::ParentNotFound { parent: "user", id: 77 })
        ));
    }

    #[tokio::test]
    async fn second_profile_for_same_user_is_rejected() {
        let h = setup();
        let (user_id, _) = ana_with_profile(&h).await;
        let err = h
            .profiles
            .create_profile(serde_json::from_value(profile_body(user_id.get())).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::ProfileExists(id) if id == user_id));
    }

    #[tokio::test]
    async fn skill_for_missing_profile_creates_nothing() {
        let h = setup();
        ana_with_profile(&h).await;

        let err = h
            .profiles
            .add_skill(
                serde_json::from_value(json!({
                    "profile_id": 9999,
                    "skill_name": "Passing",
                    "level": "Expert"
                }))
                .unwrap(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "profile with id 9999 does not exist");
        assert_eq!(h.store.skill_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn zero_profile_id_is_validation_error() {
        let h = setup();
        let err = h
            .profiles
            .add_social_link(
                serde_json::from_value(json!({
                    "profile_id": 0,
                    "platform": "X",
                    "url": "https://x.com/ana"
                }))
                .unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn list_expands_every_child_collection() {
        let h = setup();
        let (_, profile_id) = ana_with_profile(&h).await;
        let pid = profile_id.get();

        h.profiles
            .add_skill(serde_json::from_value(json!({
                "profile_id": pid, "skill_name": "Dribbling", "level": "Advanced"
            })).unwrap())
            .await
            .unwrap();
        h.profiles
            .add_achievement(serde_json::from_value(json!({
                "profile_id": pid, "title": "Golden Boot", "description": "Top scorer",
                "date_achieved": "2023-06-01T00:00:00Z"
            })).unwrap())
            .await
            .unwrap();
        h.profiles
            .add_injury(serde_json::from_value(json!({
                "profile_id": pid, "injury_type": "Ankle sprain", "description": "Minor",
                "start_date": "2023-09-01T00:00:00Z"
            })).unwrap())
            .await
            .unwrap();
        h.profiles
            .add_social_link(serde_json::from_value(json!({
                "profile_id": pid, "platform": "X", "url": "https://x.com/ana"
            })).unwrap())
            .await
            .unwrap();
        let club = h
            .profiles
            .add_club_profile(serde_json::from_value(json!({
                "profile_id": pid, "club_name": "Benfica", "club_league": "Liga Portugal",
                "club_country": "Portugal", "start_year": "2021-07-01T00:00:00Z",
                "is_present_club": true, "contract_type": "Loan"
            })).unwrap())
            .await
            .unwrap();
        h.profiles
            .add_season_stat(serde_json::from_value(json!({
                "profile_id": pid, "season": "2023/24", "club_name": "Benfica",
                "league_name": "Liga Portugal", "appearances": 30, "goals": 12
            })).unwrap())
            .await
            .unwrap();

        assert_eq!(club.data.contract_type, ContractType::Loan);

        let all = h.profiles.list_profiles().await.unwrap();
        assert_eq!(all.len(), 1);
        let details = &all[0];
        assert_eq!(details.skills.len(), 1);
        assert_eq!(details.achievements.len(), 1);
        assert_eq!(details.injuries.len(), 1);
        assert_eq!(details.social_links.len(), 1);
        assert_eq!(details.club_profiles.len(), 1);
        assert_eq!(details.season_stats.len(), 1);
        assert_eq!(details.season_stats[0].data.goals, Some(12));
    }

    #[tokio::test]
    async fn skills_of_missing_profile_is_not_found() {
        let h = setup();
        let err = h.profiles.skills(ProfileId::new(5)).await.unwrap_err();
        assert!(matches!(err, ProfileError::Domain(DomainError::NotFound)));

        let (_, profile_id) = ana_with_profile(&h).await;
        assert!(h.profiles.skills(profile_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slug_mismatch_is_not_found() {
        let h = setup();
        let (_, profile_id) = ana_with_profile(&h).await;
        let err = h.profiles.profile_by_slug(profile_id, "someone-else").await.unwrap_err();
        assert!(matches!(err, ProfileError::Domain(DomainError::NotFound)));
    }
}
