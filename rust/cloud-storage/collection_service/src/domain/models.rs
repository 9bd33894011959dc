//! Domain models - submitted attributes, settings and errors

use std::sync::LazyLock;

use models_collection::{
    AccessType, Extras,
    api::FieldErrors,
    service::CollectionVersion,
};
use regex::Regex;
use thiserror::Error;

/// Pattern every collection and version mnemonic has to match unless configured otherwise
pub const DEFAULT_NAMESPACE_PATTERN: &str = r"^[a-zA-Z0-9\-._@]+$";

/// Locale assigned to collections created without one unless configured otherwise
pub const DEFAULT_LOCALE: &str = "en";

static DEFAULT_NAMESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_NAMESPACE_PATTERN).unwrap());

/// Process wide values the serializers validate against and fall back to.
#[derive(Debug, Clone)]
pub struct SerializerSettings {
    /// Mnemonics must match this pattern
    pub namespace_regex: Regex,
    pub default_locale: String,
    pub default_access_type: AccessType,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            namespace_regex: DEFAULT_NAMESPACE_REGEX.clone(),
            default_locale: DEFAULT_LOCALE.to_string(),
            default_access_type: AccessType::View,
        }
    }
}

/// Collection fields a client submitted, after validation.
/// `None` means the field was absent from the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionAttrs {
    pub mnemonic: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub collection_type: Option<String>,
    pub public_access: Option<AccessType>,
    pub default_locale: Option<String>,
    /// Comma delimited, as submitted
    pub supported_locales: Option<String>,
    pub website: Option<String>,
    pub extras: Option<Extras>,
}

/// Collection version fields a client submitted, after validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionAttrs {
    pub mnemonic: Option<String>,
    pub released: Option<bool>,
    pub description: Option<String>,
    pub previous_version_mnemonic: Option<String>,
    pub parent_version_mnemonic: Option<String>,
    pub extras: Option<Extras>,
}

/// A version with submitted fields merged in, ready to hand to the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedVersion {
    pub version: CollectionVersion,
    /// Whether the version was released before the merge.
    /// The persistence layer unreleases siblings when this flips to released.
    pub was_released: bool,
}

/// Errors for collection and collection version operations
#[derive(Debug, Error)]
pub enum CollectionErr {
    /// The collection or version does not exist
    #[error("{0}")]
    NotFound(String),
    /// One or more submitted fields were rejected, locally or by the persistence layer
    #[error("Validation error: {0}")]
    Invalid(FieldErrors),
    /// Storage layer error
    #[error("Storage layer error {0}")]
    Storage(#[from] anyhow::Error),
}

/// Errors reported by the persistence layer when asked to store a record
#[derive(Debug, Error)]
pub enum PersistErr {
    /// The record was refused, with the reasons keyed by field name
    #[error("The record was rejected: {0}")]
    Rejected(FieldErrors),
    /// Storage layer error
    #[error("Storage layer error {0}")]
    Storage(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_namespace_pattern_accepts_mnemonics() {
        let settings = SerializerSettings::default();
        for mnemonic in ["CIEL", "malaria-2024", "v1.0", "who_icd", "me@org"] {
            assert!(
                settings.namespace_regex.is_match(mnemonic),
                "{mnemonic} should be accepted"
            );
        }
    }

    #[test]
    fn default_namespace_pattern_rejects_mnemonics() {
        let settings = SerializerSettings::default();
        for mnemonic in ["", "has space", "slash/ed", "per%cent"] {
            assert!(
                !settings.namespace_regex.is_match(mnemonic),
                "{mnemonic} should be rejected"
            );
        }
    }
}
