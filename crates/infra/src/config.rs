//! Process configuration, read once at startup.

use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEV_SECRET: &str = "ballerbio-dev-secret";

/// Immutable after startup.
#[derive(Clone)]
pub struct AppConfig {
    pub secret_key: String,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub token_ttl: chrono::Duration,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bind_addr", &self.bind_addr)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("failed to read .env");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_key = get("SECRET_KEY").unwrap_or_else(|| {
            tracing::warn!("SECRET_KEY not set; using insecure dev default");
            DEV_SECRET.to_string()
        });

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8081")?;

        let ttl_hours = match get("TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|h| *h > 0)
                .with_context(|| format!("TOKEN_TTL_HOURS must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        Ok(Self {
            secret_key,
            database_url: get("DATABASE_URL"),
            bind_addr,
            token_ttl: chrono::Duration::hours(ttl_hours),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.secret_key, DEV_SECRET);
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.token_ttl, chrono::Duration::hours(24));
    }

    #[test]
    fn reads_every_key() {
        let config = load(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/ballerbio"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("TOKEN_TTL_HOURS", "2"),
        ])
        .unwrap();
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/ballerbio"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.token_ttl, chrono::Duration::hours(2));
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("TOKEN_TTL_HOURS", "0")]).is_err());
        assert!(load(&[("TOKEN_TTL_HOURS", "soon")]).is_err());
        assert!(load(&[("BIND_ADDR", "localhost")]).is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let config = load(&[("SECRET_KEY", "s3cret")]).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
