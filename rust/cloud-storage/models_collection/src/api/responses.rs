//! API layer response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::{AccessType, Extras, OwnerType};

// ===== Collection Responses =====

/// Collection as rendered in list views.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionListResponse {
    /// The collection mnemonic
    pub id: String,
    pub name: String,
    pub url: String,
    pub owner: String,
    pub owner_type: OwnerType,
    pub owner_url: String,
}

/// Collection as rendered by the create, update and detail views.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionDetailResponse {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub uuid: Uuid,
    /// The collection mnemonic
    pub id: String,
    pub short_code: String,
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub collection_type: Option<String>,
    pub public_access: AccessType,
    pub default_locale: String,
    /// Comma joined locale codes
    pub supported_locales: Option<String>,
    pub website: Option<String>,
    pub url: String,
    pub versions_url: String,
    pub concepts_url: String,
    /// Number of active concept references in the collection
    pub active_concepts: u64,
    pub owner: String,
    pub owner_type: OwnerType,
    pub owner_url: String,
    /// Number of versions of the collection
    pub versions: u32,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub extras: Option<Extras>,
}

// ===== Collection Version Responses =====

/// Collection version as rendered in list views.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionVersionListResponse {
    /// The version mnemonic
    pub id: String,
    pub released: bool,
    pub owner: String,
    pub owner_type: OwnerType,
    pub owner_url: String,
    pub version_url: String,
    /// Url of the versioned collection
    pub url: String,
}

/// Collection version as rendered by the create, update and detail views.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionVersionDetailResponse {
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The version mnemonic
    pub id: String,
    pub description: Option<String>,
    pub released: bool,
    pub owner: String,
    pub owner_type: OwnerType,
    pub owner_url: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    #[schema(value_type = Option<Object>)]
    pub extras: Option<Extras>,
    pub version_url: String,
    /// Url of the versioned collection
    #[serde(rename = "collectionUrl")]
    pub collection_url: String,
    #[serde(rename = "parentVersionUrl")]
    pub parent_version_url: Option<String>,
    #[serde(rename = "previousVersionUrl")]
    pub previous_version_url: Option<String>,
}
