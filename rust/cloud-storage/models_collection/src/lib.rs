//! Collection Models
//!
//! This crate defines the data models for terminology collections and their versions
//! using a three-layer layout:
//!
//! - **shared**: Shared types (AccessType, Owner, LocaleSet) used across all layers
//! - **service**: Persisted record types handed to and returned by the persistence layer
//! - **api**: API layer types (external-facing requests/responses and field errors)

pub mod api;
pub mod service;
pub mod shared;

// Re-export commonly used shared types for convenience
pub use shared::{AccessType, Extras, LocaleSet, Owner, OwnerType, UnknownAccessType};
