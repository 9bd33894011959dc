//! Collection Service library following hexagonal architecture pattern
//!
//! This library maps terminology collections and their versions between persisted records
//! and their wire representations, validates submitted fields, merges partial updates and
//! delegates persistence to the [domain::ports::CollectionRepo] port.

pub mod config;
pub mod domain;
pub mod entrypoint;
pub mod inbound;
pub mod outbound;
