use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use models_collection::AccessType;
use regex::Regex;
use thiserror::Error;

use crate::domain::{
    links::{COLLECTION_VERSION_DETAIL_VIEW, LinkResolver},
    models::{DEFAULT_LOCALE, DEFAULT_NAMESPACE_PATTERN, SerializerSettings},
};

/// The current environment the application is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// The server is running on localhost
    Local,
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// port number of service
    pub port: u16,
    /// The environment we are in
    pub environment: Environment,
    /// Collection and version mnemonics must match this pattern
    pub namespace_regex: Regex,
    /// Locale given to collections created without one
    pub default_locale: String,
    /// Access given to collections created without one
    pub default_access_type: AccessType,
    /// View name lineage links on version details are reversed through
    pub version_view_name: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any source of variables, unset variables take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or("8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let environment = lookup("ENVIRONMENT")
            .unwrap_or("prod".to_string())
            .parse::<Environment>()
            .context("ENVIRONMENT must be one of prod, dev or local")?;

        let namespace_regex = Regex::new(
            &lookup("NAMESPACE_REGEX").unwrap_or(DEFAULT_NAMESPACE_PATTERN.to_string()),
        )
        .context("NAMESPACE_REGEX must be a valid regular expression")?;

        let default_locale = lookup("DEFAULT_LOCALE").unwrap_or(DEFAULT_LOCALE.to_string());

        let default_access_type = lookup("DEFAULT_ACCESS_TYPE")
            .map(|value| value.parse::<AccessType>())
            .transpose()
            .context("DEFAULT_ACCESS_TYPE must be one of View, Edit or None")?
            .unwrap_or(AccessType::View);

        let version_view_name = lookup("VERSION_VIEW_NAME")
            .unwrap_or(COLLECTION_VERSION_DETAIL_VIEW.to_string());

        Ok(Config {
            port,
            environment,
            namespace_regex,
            default_locale,
            default_access_type,
            version_view_name,
        })
    }

    pub fn serializer_settings(&self) -> SerializerSettings {
        SerializerSettings {
            namespace_regex: self.namespace_regex.clone(),
            default_locale: self.default_locale.clone(),
            default_access_type: self.default_access_type,
        }
    }

    /// Fails when the configured version view has no registered route
    pub fn link_resolver(&self) -> anyhow::Result<LinkResolver> {
        LinkResolver::default()
            .with_version_view(self.version_view_name.as_str())
            .context("VERSION_VIEW_NAME must name a registered view")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn it_falls_back_to_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.namespace_regex.as_str(), DEFAULT_NAMESPACE_PATTERN);
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.default_access_type, AccessType::View);
        assert_eq!(
            config.link_resolver().unwrap().version_view_name(),
            COLLECTION_VERSION_DETAIL_VIEW
        );
    }

    #[test]
    fn it_reads_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("ENVIRONMENT", "local"),
            ("NAMESPACE_REGEX", "^[a-z]+$"),
            ("DEFAULT_LOCALE", "fr"),
            ("DEFAULT_ACCESS_TYPE", "Edit"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.environment, Environment::Local);

        let settings = config.serializer_settings();
        assert!(settings.namespace_regex.is_match("malaria"));
        assert!(!settings.namespace_regex.is_match("Malaria"));
        assert_eq!(settings.default_locale, "fr");
        assert_eq!(settings.default_access_type, AccessType::Edit);
    }

    #[test]
    fn it_rejects_invalid_values() {
        assert!(config(&[("NAMESPACE_REGEX", "[a-z")]).is_err());
        assert!(config(&[("DEFAULT_ACCESS_TYPE", "Private")]).is_err());
        assert!(config(&[("ENVIRONMENT", "staging")]).is_err());
        assert!(config(&[("PORT", "not a port")]).is_err());
    }

    #[test]
    fn unknown_version_views_fail_link_setup() {
        let config = config(&[("VERSION_VIEW_NAME", "missing-view")]).unwrap();
        assert!(config.link_resolver().is_err());
    }

    #[test]
    fn environments_parse_from_their_display_names() {
        for environment in [
            Environment::Production,
            Environment::Develop,
            Environment::Local,
        ] {
            assert_eq!(
                environment.to_string().parse::<Environment>().unwrap(),
                environment
            );
        }
    }
}
