//! Set of locale codes supported by a collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Locale codes a collection supports.
///
/// Stored as a set. On the wire the set travels as a single comma joined string,
/// see [LocaleSet::parse_wire] and [LocaleSet::to_wire].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LocaleSet(BTreeSet<String>);

impl LocaleSet {
    /// Split a comma delimited wire value into a set of locales.
    /// Blank entries are dropped.
    pub fn parse_wire(value: &str) -> Self {
        value
            .split(',')
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Join the set back into its comma delimited wire form
    pub fn to_wire(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.0.contains(locale)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for LocaleSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
