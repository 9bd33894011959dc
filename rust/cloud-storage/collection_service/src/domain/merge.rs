//! Merge submitted attributes onto records.
//!
//! Every mutable field takes the submitted value when one was sent and keeps the value
//! already on the record otherwise, which makes repeated partial updates idempotent.

use models_collection::{
    LocaleSet, Owner,
    api::{FieldErrors, messages},
    service::{Collection, CollectionVersion},
};

use crate::domain::models::{CollectionAttrs, MergedVersion, SerializerSettings, VersionAttrs};

/// Merge submitted fields onto `instance`, or onto a new collection owned by `owner`
/// when `instance` is `None`.
///
/// A new collection starts out with the configured default access type and locale.
pub fn restore_collection(
    attrs: CollectionAttrs,
    instance: Option<Collection>,
    owner: &Owner,
    settings: &SerializerSettings,
) -> Collection {
    let mut collection = instance.unwrap_or_else(|| {
        Collection::new(
            owner.clone(),
            String::new(),
            String::new(),
            settings.default_access_type,
            settings.default_locale.clone(),
        )
    });

    let CollectionAttrs {
        mnemonic,
        name,
        full_name,
        description,
        collection_type,
        public_access,
        default_locale,
        supported_locales,
        website,
        extras,
    } = attrs;

    if let Some(mnemonic) = mnemonic {
        collection.mnemonic = mnemonic;
    }
    if let Some(name) = name {
        collection.name = name;
    }
    if full_name.is_some() {
        collection.full_name = full_name;
    }
    if description.is_some() {
        collection.description = description;
    }
    if collection_type.is_some() {
        collection.collection_type = collection_type;
    }
    if let Some(public_access) = public_access {
        collection.public_access = public_access;
    }
    if let Some(default_locale) = default_locale {
        collection.default_locale = default_locale;
    }
    // an empty string keeps the current set
    if let Some(locales) = supported_locales.filter(|l| !l.is_empty()) {
        collection.supported_locales = LocaleSet::parse_wire(&locales);
    }
    if website.is_some() {
        collection.website = website;
    }
    if extras.is_some() {
        collection.extras = extras;
    }

    collection
}

/// Merge submitted fields onto `version`.
///
/// A released version cannot be unreleased by a client. Submitting `released: false`
/// for one records an error on `released` in `errors` and leaves the flag set.
pub fn restore_version(
    attrs: VersionAttrs,
    mut version: CollectionVersion,
    errors: &mut FieldErrors,
) -> MergedVersion {
    let VersionAttrs {
        mnemonic,
        released,
        description,
        previous_version_mnemonic,
        parent_version_mnemonic,
        extras,
    } = attrs;

    if let Some(mnemonic) = mnemonic {
        version.mnemonic = mnemonic;
    }
    if description.is_some() {
        version.description = description;
    }

    let was_released = version.released;
    match released {
        Some(false) if was_released => {
            errors.add("released", messages::RELEASED_CANNOT_BE_UNSET);
        }
        Some(released) => version.released = released,
        None => {}
    }

    if previous_version_mnemonic.is_some() {
        version.previous_version_mnemonic = previous_version_mnemonic;
    }
    if parent_version_mnemonic.is_some() {
        version.parent_version_mnemonic = parent_version_mnemonic;
    }
    if extras.is_some() {
        version.extras = extras;
    }

    MergedVersion {
        version,
        was_released,
    }
}
