//! API layer request types.
//!
//! Every field is optional at the type level. Which fields are required depends on the
//! operation (create or update) and is enforced by the service's validation rules, so that
//! a missing field becomes a field error instead of a deserialization failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::Extras;

/// Body of a collection create or update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CollectionWriteRequest {
    /// The collection mnemonic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
    /// One of `View`, `Edit` or `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    /// Comma delimited locale codes, e.g. `en,fr,es`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_locales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub extras: Option<Extras>,
}

/// Body of a collection version create or update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CollectionVersionWriteRequest {
    /// The version mnemonic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mnemonic of the version this one follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<String>,
    /// Mnemonic of the version this one was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub extras: Option<Extras>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_as_none() {
        let request: CollectionWriteRequest =
            serde_json::from_str(r#"{"name": "Malaria", "supported_locales": "en,fr"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Malaria"));
        assert_eq!(request.supported_locales.as_deref(), Some("en,fr"));
        assert!(request.id.is_none());
        assert!(request.public_access.is_none());
        assert!(request.extras.is_none());
    }

    #[test]
    fn it_reads_lineage_fields_by_wire_name() {
        let request: CollectionVersionWriteRequest = serde_json::from_str(
            r#"{"id": "v2", "released": true, "previous_version": "v1", "parent_version": "v1"}"#,
        )
        .unwrap();
        assert_eq!(request.released, Some(true));
        assert_eq!(request.previous_version.as_deref(), Some("v1"));
        assert_eq!(request.parent_version.as_deref(), Some("v1"));
    }
}
