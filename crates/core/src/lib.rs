//! `ballerbio-core` — domain foundation shared by every other crate.
//!
//! Pure types only: identifiers, the error model, value objects. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use id::{ProfileId, RecordId, UserId};
pub use value_object::{Email, Slug, Timestamps, ValueObject};
