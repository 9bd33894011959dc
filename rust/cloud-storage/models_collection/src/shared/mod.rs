pub mod access_type;
pub mod locale_set;
pub mod owner;

pub use access_type::{AccessType, UnknownAccessType};
pub use locale_set::LocaleSet;
pub use owner::{Owner, OwnerType};

/// Free-form client metadata attached to a collection or version.
pub type Extras = serde_json::Map<String, serde_json::Value>;
