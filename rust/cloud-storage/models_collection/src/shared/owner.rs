//! The parent resource a collection belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Kind of resource that owns a collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum OwnerType {
    User,
    Organization,
}

impl OwnerType {
    /// The url path segment under which resources of this kind are listed
    pub fn path_segment(&self) -> &'static str {
        match self {
            OwnerType::User => "users",
            OwnerType::Organization => "orgs",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerType::User => write!(f, "User"),
            OwnerType::Organization => write!(f, "Organization"),
        }
    }
}

/// A user or organization that owns collections.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Owner {
    pub owner_type: OwnerType,
    pub name: String,
}

impl Owner {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            owner_type: OwnerType::User,
            name: name.into(),
        }
    }

    pub fn organization(name: impl Into<String>) -> Self {
        Self {
            owner_type: OwnerType::Organization,
            name: name.into(),
        }
    }

    /// Url of the owner resource, e.g. `/orgs/CIEL/`
    pub fn url(&self) -> String {
        format!("/{}/{}/", self.owner_type.path_segment(), self.name)
    }
}
