//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and service construction
//! - `routes/`: HTTP routes + handlers
//! - `extract.rs`, `dto.rs`: request decoding and response shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use ballerbio_auth::{Hs256Jwt, JwtValidator};
use ballerbio_infra::{AppConfig, Stores};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from ready services.
///
/// Protected routes answer both at the root and under `/api`.
pub fn build_app(services: AppServices, jwt: Arc<dyn JwtValidator>) -> Router {
    let auth_state = middleware::AuthState { jwt };

    let protected = routes::protected_router().route_layer(
        axum::middleware::from_fn_with_state(auth_state, middleware::auth_middleware),
    );

    Router::new()
        .merge(routes::public_router())
        .merge(protected.clone())
        .nest("/api", protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(Arc::new(services))),
        )
}

/// Public entrypoint used by `main.rs`.
pub async fn build_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let (services, jwt) = services::build_services(config).await?;
    Ok(build_app(services, jwt))
}

/// In-memory app with the given signing secret and default token lifetime.
pub fn build_in_memory_app(secret: &str) -> Router {
    let jwt = Arc::new(Hs256Jwt::with_default_ttl(secret.as_bytes()));
    let services = AppServices::new(&Stores::in_memory(), jwt.clone());
    build_app(services, jwt)
}
