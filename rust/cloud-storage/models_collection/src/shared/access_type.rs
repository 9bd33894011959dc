//! Public access level of a collection.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Who may see or edit a collection without being a member of its owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum AccessType {
    View,
    Edit,
    None,
}

impl AccessType {
    /// The accepted wire values, in display order.
    pub const CHOICES: [&'static str; 3] = ["View", "Edit", "None"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::View => "View",
            AccessType::Edit => "Edit",
            AccessType::None => "None",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a value which is not one of [AccessType::CHOICES]
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0} is not a valid access type")]
pub struct UnknownAccessType(pub String);

impl FromStr for AccessType {
    type Err = UnknownAccessType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "View" => Ok(AccessType::View),
            "Edit" => Ok(AccessType::Edit),
            "None" => Ok(AccessType::None),
            other => Err(UnknownAccessType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_every_choice() {
        for choice in AccessType::CHOICES {
            let parsed: AccessType = choice.parse().unwrap();
            assert_eq!(parsed.as_str(), choice);
        }
    }

    #[test]
    fn it_rejects_lowercase_values() {
        assert_eq!(
            "view".parse::<AccessType>(),
            Err(UnknownAccessType("view".to_string()))
        );
    }
}
