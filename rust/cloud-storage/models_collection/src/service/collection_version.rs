//! Service layer collection version model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Collection;
use crate::api::{CollectionVersionDetailResponse, CollectionVersionListResponse};
use crate::shared::{Extras, Owner};

/// Collection version model (service representation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionVersion {
    pub id: Uuid,
    /// Short code unique within the versioned collection
    pub mnemonic: String,
    pub collection_id: Uuid,
    pub collection_mnemonic: String,
    /// Owner of the versioned collection
    pub owner: Owner,
    pub description: Option<String>,
    pub released: bool,
    /// Lineage back reference to the version this one follows
    pub previous_version_mnemonic: Option<String>,
    /// Lineage back reference to the version this one was derived from
    pub parent_version_mnemonic: Option<String>,
    pub extras: Option<Extras>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionVersion {
    pub const RESOURCE_TYPE: &'static str = "Collection Version";

    /// Mnemonic of the version created alongside every new collection
    pub const HEAD: &'static str = "HEAD";

    /// Create an unreleased, not yet persisted version of `collection`
    pub fn new(collection: &Collection, mnemonic: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            mnemonic,
            collection_id: collection.id,
            collection_mnemonic: collection.mnemonic.clone(),
            owner: collection.owner.clone(),
            description: None,
            released: false,
            previous_version_mnemonic: None,
            parent_version_mnemonic: None,
            extras: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Url of the versioned collection
    pub fn collection_url(&self) -> String {
        format!(
            "{}collections/{}/",
            self.owner.url(),
            self.collection_mnemonic
        )
    }

    pub fn url(&self) -> String {
        format!("{}{}/", self.collection_url(), self.mnemonic)
    }
}

/// Hyperlinks rendered on a version detail, resolved by view name at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionLinks {
    pub version_url: String,
    pub collection_url: String,
    pub parent_version_url: Option<String>,
    pub previous_version_url: Option<String>,
}

/// A version together with its resolved hyperlinks.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionWithLinks {
    pub version: CollectionVersion,
    pub links: VersionLinks,
}

// ===== Conversions =====

impl From<&VersionWithLinks> for CollectionVersionListResponse {
    fn from(svc: &VersionWithLinks) -> Self {
        let VersionWithLinks { version, links } = svc;
        Self {
            id: version.mnemonic.clone(),
            released: version.released,
            owner: version.owner.name.clone(),
            owner_type: version.owner.owner_type,
            owner_url: version.owner.url(),
            version_url: links.version_url.clone(),
            url: links.collection_url.clone(),
        }
    }
}

impl From<VersionWithLinks> for CollectionVersionDetailResponse {
    fn from(svc: VersionWithLinks) -> Self {
        let VersionWithLinks { version, links } = svc;
        Self {
            resource_type: CollectionVersion::RESOURCE_TYPE.to_string(),
            owner_url: version.owner.url(),
            id: version.mnemonic,
            description: version.description,
            released: version.released,
            owner: version.owner.name,
            owner_type: version.owner.owner_type,
            created_on: version.created_at,
            updated_on: version.updated_at,
            extras: version.extras,
            version_url: links.version_url,
            collection_url: links.collection_url,
            parent_version_url: links.parent_version_url,
            previous_version_url: links.previous_version_url,
        }
    }
}
