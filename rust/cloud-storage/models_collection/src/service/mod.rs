//! Service layer types - the records exchanged with the persistence layer,
//! plus the read models enriched with values computed at render time.

pub mod collection;
pub mod collection_version;

pub use collection::{Collection, CollectionWithStats};
pub use collection_version::{CollectionVersion, VersionLinks, VersionWithLinks};
