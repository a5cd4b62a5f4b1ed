use axum::{routing::get, Router};

pub mod children;
pub mod profiles;
pub mod system;
pub mod users;

/// Endpoints open to anonymous callers.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(users::router())
        .merge(profiles::public_router())
}

/// Endpoints behind the bearer-token guard.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .merge(profiles::protected_router())
        .merge(children::router())
}
