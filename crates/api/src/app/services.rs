//! Service wiring: stores and token signer in, services out.

use std::sync::Arc;

use ballerbio_auth::{AuthService, Hs256Jwt};
use ballerbio_infra::{AppConfig, Stores};
use ballerbio_profiles::ProfileService;

#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub profiles: ProfileService,
}

impl AppServices {
    pub fn new(stores: &Stores, jwt: Arc<Hs256Jwt>) -> Self {
        Self {
            auth: AuthService::new(stores.credentials.clone(), jwt),
            profiles: ProfileService::new(stores.profiles.clone()),
        }
    }
}

/// Connect the configured store and build the signer from the secret.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<(AppServices, Arc<Hs256Jwt>)> {
    let stores = Stores::from_config(config).await?;
    let jwt = Arc::new(Hs256Jwt::new(config.secret_key.as_bytes(), config.token_ttl));
    Ok((AppServices::new(&stores, jwt.clone()), jwt))
}
