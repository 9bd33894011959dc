//! Service layer collection model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{CollectionDetailResponse, CollectionListResponse};
use crate::shared::{AccessType, Extras, LocaleSet, Owner};

/// Collection model (service representation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: Uuid,
    /// Short code unique per owner
    pub mnemonic: String,
    /// The parent resource
    pub owner: Owner,
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub collection_type: Option<String>,
    pub public_access: AccessType,
    pub default_locale: String,
    pub supported_locales: LocaleSet,
    pub website: Option<String>,
    pub extras: Option<Extras>,
    /// Maintained by the persistence layer
    pub num_versions: u32,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    pub const RESOURCE_TYPE: &'static str = "Collection";

    /// Create a not yet persisted collection with every optional field unset
    pub fn new(
        owner: Owner,
        mnemonic: String,
        name: String,
        public_access: AccessType,
        default_locale: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            mnemonic,
            owner,
            name,
            full_name: None,
            description: None,
            collection_type: None,
            public_access,
            default_locale,
            supported_locales: LocaleSet::default(),
            website: None,
            extras: None,
            num_versions: 0,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn url(&self) -> String {
        format!("{}collections/{}/", self.owner.url(), self.mnemonic)
    }

    pub fn versions_url(&self) -> String {
        format!("{}versions/", self.url())
    }

    pub fn concepts_url(&self) -> String {
        format!("{}concepts/", self.url())
    }
}

/// A collection together with the values computed when it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionWithStats {
    pub collection: Collection,
    /// Count of active concept references whose parent is this collection
    pub active_concepts: u64,
}

// ===== Conversions =====

impl From<&Collection> for CollectionListResponse {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.mnemonic.clone(),
            name: collection.name.clone(),
            url: collection.url(),
            owner: collection.owner.name.clone(),
            owner_type: collection.owner.owner_type,
            owner_url: collection.owner.url(),
        }
    }
}

impl From<CollectionWithStats> for CollectionDetailResponse {
    fn from(svc: CollectionWithStats) -> Self {
        let CollectionWithStats {
            collection,
            active_concepts,
        } = svc;

        let supported_locales = if collection.supported_locales.is_empty() {
            None
        } else {
            Some(collection.supported_locales.to_wire())
        };

        Self {
            resource_type: Collection::RESOURCE_TYPE.to_string(),
            uuid: collection.id,
            short_code: collection.mnemonic.clone(),
            url: collection.url(),
            versions_url: collection.versions_url(),
            concepts_url: collection.concepts_url(),
            owner_url: collection.owner.url(),
            id: collection.mnemonic,
            name: collection.name,
            full_name: collection.full_name,
            description: collection.description,
            collection_type: collection.collection_type,
            public_access: collection.public_access,
            default_locale: collection.default_locale,
            supported_locales,
            website: collection.website,
            active_concepts,
            owner: collection.owner.name,
            owner_type: collection.owner.owner_type,
            versions: collection.num_versions,
            created_on: collection.created_at,
            updated_on: collection.updated_at,
            created_by: collection.created_by,
            updated_by: collection.updated_by,
            extras: collection.extras,
        }
    }
}
