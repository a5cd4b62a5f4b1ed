//! Storage adapters implementing the credential and profile contracts.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use ballerbio_auth::CredentialStore;
use ballerbio_profiles::ProfileRepository;

use crate::config::AppConfig;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

/// The store handles the services are built from.
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialStore>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self::shared(Arc::new(InMemoryStore::new()))
    }

    /// Both contracts served by one backend.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: CredentialStore + ProfileRepository + 'static,
    {
        Self {
            credentials: store.clone(),
            profiles: store,
        }
    }

    /// Postgres when `DATABASE_URL` is configured, otherwise in-memory.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match &config.database_url {
            Some(url) => {
                let store = PostgresStore::connect(url).await?;
                tracing::info!("using postgres store");
                Ok(Self::shared(Arc::new(store)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }
}
