//! HTTP API: routing, bearer-token guard, and error-to-response mapping.

pub mod app;
pub mod context;
pub mod middleware;
