//! Field level validation errors

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use utoipa::ToSchema;

/// Messages attached to [FieldErrors] entries
pub mod messages {
    /// A required field was absent or blank
    pub const REQUIRED: &str = "This field is required.";

    /// A field failed its pattern check
    pub const INVALID: &str = "Enter a valid value.";

    /// A released version was submitted with `released: false`
    pub const RELEASED_CANNOT_BE_UNSET: &str = "Cannot set this field to \"false\".  (Releasing another version will cause this field to become false.)";

    /// A field was given a value outside of its choice set
    pub fn invalid_choice(value: &str) -> String {
        format!("Select a valid choice. {value} is not one of the available choices.")
    }

    /// A mnemonic collides with a fixed path segment of the api
    pub fn reserved(value: &str) -> String {
        format!("{value} is a reserved name.")
    }

    /// The request body was json, but not a json object
    pub fn expected_object(kind: &str) -> String {
        format!("Invalid data. Expected a dictionary, but got {kind}.")
    }
}

/// A plain json error response for failures that are not tied to a field.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse<'a> {
    /// Message to explain failure
    pub message: &'a str,
}

/// Mapping of field name to the human readable messages explaining why that field was rejected.
///
/// Serializes as a plain json object, e.g. `{"id": ["Enter a valid value."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Key for errors that concern the request as a whole rather than one field
    pub const NON_FIELD_ERRORS: &'static str = "non_field_errors";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field, keeping any messages already present
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Merge another error map into this one.
    /// Messages for a field present in both maps are appended, never replaced.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The names of every rejected field
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl<F, M> FromIterator<(F, M)> for FieldErrors
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, M)>>(iter: T) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.add(field, message);
        }
        errors
    }
}
