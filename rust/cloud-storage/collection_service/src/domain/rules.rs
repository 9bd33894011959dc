//! Field validation rules evaluated against a request before it is merged.
//!
//! Each operation gets its own [RuleTable]. Required fields, mnemonic patterns and
//! enumerated choices are all checked up front so that an invalid request never reaches
//! the persistence layer.

use models_collection::{
    AccessType, UnknownAccessType,
    api::{CollectionVersionWriteRequest, CollectionWriteRequest, FieldErrors, messages},
};
use regex::Regex;

use crate::domain::models::{CollectionAttrs, SerializerSettings, VersionAttrs};

/// Read access to the text valued fields of a submitted request, by wire name
pub trait SubmittedText {
    /// The submitted value of `field`, `None` if it was absent
    fn text(&self, field: &str) -> Option<&str>;
}

impl SubmittedText for CollectionWriteRequest {
    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "id" => self.id.as_deref(),
            "name" => self.name.as_deref(),
            "full_name" => self.full_name.as_deref(),
            "description" => self.description.as_deref(),
            "collection_type" => self.collection_type.as_deref(),
            "public_access" => self.public_access.as_deref(),
            "default_locale" => self.default_locale.as_deref(),
            "supported_locales" => self.supported_locales.as_deref(),
            "website" => self.website.as_deref(),
            _ => None,
        }
    }
}

impl SubmittedText for CollectionVersionWriteRequest {
    fn text(&self, field: &str) -> Option<&str> {
        match field {
            "id" => self.id.as_deref(),
            "description" => self.description.as_deref(),
            "previous_version" => self.previous_version.as_deref(),
            "parent_version" => self.parent_version.as_deref(),
            _ => None,
        }
    }
}

/// Version mnemonics that would be shadowed by the fixed segments of the version routes
pub const RESERVED_VERSION_IDS: &[&str] = &["versions"];

/// A single check applied to one field
#[derive(Debug, Clone)]
pub enum FieldRule<'a> {
    /// The field must be present and not blank
    Required,
    /// When present the field must match the pattern
    Matches(&'a Regex),
    /// When present the field must be one of the choices
    OneOf(&'static [&'static str]),
    /// When present the field must not be one of these names
    NoneOf(&'static [&'static str]),
}

/// The rules of every validated field for one operation
#[derive(Debug, Clone, Default)]
pub struct RuleTable<'a> {
    fields: Vec<(&'static str, Vec<FieldRule<'a>>)>,
}

impl<'a> RuleTable<'a> {
    /// Add rules for a field
    pub fn field(
        mut self,
        name: &'static str,
        rules: impl IntoIterator<Item = FieldRule<'a>>,
    ) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    pub fn collection_create(settings: &'a SerializerSettings) -> Self {
        Self::default()
            .field(
                "id",
                [
                    FieldRule::Required,
                    FieldRule::Matches(&settings.namespace_regex),
                ],
            )
            .field("name", [FieldRule::Required])
            .field("public_access", [FieldRule::OneOf(&AccessType::CHOICES)])
    }

    pub fn collection_update(settings: &'a SerializerSettings) -> Self {
        Self::default()
            .field("id", [FieldRule::Matches(&settings.namespace_regex)])
            .field("public_access", [FieldRule::OneOf(&AccessType::CHOICES)])
    }

    pub fn version_create(settings: &'a SerializerSettings) -> Self {
        Self::default().field(
            "id",
            [
                FieldRule::Required,
                FieldRule::Matches(&settings.namespace_regex),
                FieldRule::NoneOf(RESERVED_VERSION_IDS),
            ],
        )
    }

    /// Version updates only refuse reserved ids; the release guard runs during merge
    pub fn version_update() -> Self {
        Self::default().field("id", [FieldRule::NoneOf(RESERVED_VERSION_IDS)])
    }

    /// Evaluate every rule, collecting one message per failed field
    pub fn validate(&self, submitted: &impl SubmittedText) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for (field, rules) in &self.fields {
            let value = submitted.text(field);
            for rule in rules {
                match (rule, value) {
                    (FieldRule::Required, None) => {
                        errors.add(*field, messages::REQUIRED);
                        break;
                    }
                    (FieldRule::Required, Some(v)) if v.trim().is_empty() => {
                        errors.add(*field, messages::REQUIRED);
                        break;
                    }
                    (FieldRule::Matches(regex), Some(v)) if !regex.is_match(v) => {
                        errors.add(*field, messages::INVALID);
                        break;
                    }
                    (FieldRule::OneOf(choices), Some(v))
                        if !choices.iter().any(|choice| *choice == v) =>
                    {
                        errors.add(*field, messages::invalid_choice(v));
                        break;
                    }
                    (FieldRule::NoneOf(reserved), Some(v))
                        if reserved.iter().any(|name| *name == v) =>
                    {
                        errors.add(*field, messages::reserved(v));
                        break;
                    }
                    _ => {}
                }
            }
        }

        errors
    }
}

/// Validate a collection request against `rules` and convert it into [CollectionAttrs]
pub fn validate_collection(
    request: CollectionWriteRequest,
    rules: &RuleTable<'_>,
) -> Result<CollectionAttrs, FieldErrors> {
    let errors = rules.validate(&request);
    if !errors.is_empty() {
        return Err(errors);
    }

    let public_access = request
        .public_access
        .as_deref()
        .map(str::parse::<AccessType>)
        .transpose()
        .map_err(|UnknownAccessType(value)| {
            FieldErrors::from_iter([("public_access", messages::invalid_choice(&value))])
        })?;

    Ok(CollectionAttrs {
        mnemonic: request.id,
        name: request.name,
        full_name: request.full_name,
        description: request.description,
        collection_type: request.collection_type,
        public_access,
        default_locale: request.default_locale,
        supported_locales: request.supported_locales,
        website: request.website,
        extras: request.extras,
    })
}

/// Validate a version request against `rules` and convert it into [VersionAttrs]
pub fn validate_version(
    request: CollectionVersionWriteRequest,
    rules: &RuleTable<'_>,
) -> Result<VersionAttrs, FieldErrors> {
    let errors = rules.validate(&request);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(VersionAttrs {
        mnemonic: request.id,
        released: request.released,
        description: request.description,
        previous_version_mnemonic: request.previous_version,
        parent_version_mnemonic: request.parent_version,
        extras: request.extras,
    })
}
