//! Infrastructure layer: configuration and storage adapters.

pub mod config;
pub mod store;

pub use config::AppConfig;
pub use store::{InMemoryStore, PostgresStore, Stores};

mod integration_tests;
