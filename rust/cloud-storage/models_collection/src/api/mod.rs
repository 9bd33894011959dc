//! API layer types - external-facing request and response types.
//!
//! These structs represent the API contract with clients. Field names follow the
//! established collection wire format, which is snake_case apart from the lineage links.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::*;
pub use requests::*;
pub use responses::*;
