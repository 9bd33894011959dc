//! Reverse view names into urls.
//!
//! Version details link to their parent and previous versions. Those links are resolved
//! when the version is rendered, through a route registered under a view name. The view
//! used for versions is configurable.

use std::collections::HashMap;

use models_collection::service::{CollectionVersion, VersionLinks};
use thiserror::Error;

/// View name of the collection detail route
pub const COLLECTION_DETAIL_VIEW: &str = "collection-detail";

/// View name of the collection version detail route
pub const COLLECTION_VERSION_DETAIL_VIEW: &str = "collectionversion-detail";

/// Errors which can occur while reversing a view name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReverseErr {
    #[error("No route is registered under the view name {0}")]
    UnknownView(String),
    #[error("The route for {view} requires the {param} parameter")]
    MissingParam { view: String, param: String },
    #[error("The route template for {0} has an unclosed parameter")]
    MalformedTemplate(String),
}

/// Route templates keyed by view name, e.g. `/{owner_type}/{owner}/collections/{collection}/`
#[derive(Debug, Clone)]
pub struct LinkResolver {
    routes: HashMap<String, String>,
    version_view_name: String,
}

impl Default for LinkResolver {
    fn default() -> Self {
        let routes = [
            (
                COLLECTION_DETAIL_VIEW,
                "/{owner_type}/{owner}/collections/{collection}/",
            ),
            (
                COLLECTION_VERSION_DETAIL_VIEW,
                "/{owner_type}/{owner}/collections/{collection}/{version}/",
            ),
        ]
        .into_iter()
        .map(|(view, template)| (view.to_string(), template.to_string()))
        .collect();

        Self {
            routes,
            version_view_name: COLLECTION_VERSION_DETAIL_VIEW.to_string(),
        }
    }
}

impl LinkResolver {
    /// Register (or replace) the route template for a view name
    pub fn with_route(mut self, view_name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(view_name.into(), template.into());
        self
    }

    /// Use `view_name` when linking versions. The view has to be registered already.
    pub fn with_version_view(mut self, view_name: impl Into<String>) -> Result<Self, ReverseErr> {
        let view_name = view_name.into();
        if !self.routes.contains_key(&view_name) {
            return Err(ReverseErr::UnknownView(view_name));
        }
        self.version_view_name = view_name;
        Ok(self)
    }

    pub fn version_view_name(&self) -> &str {
        &self.version_view_name
    }

    /// Substitute `params` into the template registered under `view_name`
    pub fn reverse(&self, view_name: &str, params: &[(&str, &str)]) -> Result<String, ReverseErr> {
        let template = self
            .routes
            .get(view_name)
            .ok_or_else(|| ReverseErr::UnknownView(view_name.to_string()))?;

        let mut url = String::with_capacity(template.len());
        let mut rest = template.as_str();
        while let Some(start) = rest.find('{') {
            url.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| ReverseErr::MalformedTemplate(view_name.to_string()))?;
            let param = &after[..end];
            let value = params
                .iter()
                .find_map(|(name, value)| (*name == param).then_some(*value))
                .ok_or_else(|| ReverseErr::MissingParam {
                    view: view_name.to_string(),
                    param: param.to_string(),
                })?;
            url.push_str(value);
            rest = &after[end + 1..];
        }
        url.push_str(rest);

        Ok(url)
    }

    /// Url of the collection `version` belongs to
    pub fn collection_url(&self, version: &CollectionVersion) -> Result<String, ReverseErr> {
        self.reverse(
            COLLECTION_DETAIL_VIEW,
            &[
                ("owner_type", version.owner.owner_type.path_segment()),
                ("owner", &version.owner.name),
                ("collection", &version.collection_mnemonic),
            ],
        )
    }

    /// Url of `version` through the configured version view
    pub fn version_url(&self, version: &CollectionVersion) -> Result<String, ReverseErr> {
        self.reverse(
            &self.version_view_name,
            &[
                ("owner_type", version.owner.owner_type.path_segment()),
                ("owner", &version.owner.name),
                ("collection", &version.collection_mnemonic),
                ("version", &version.mnemonic),
            ],
        )
    }

    /// Resolve every link rendered on a version detail.
    /// `parent` and `previous` are the lineage targets, when they exist.
    pub fn links(
        &self,
        version: &CollectionVersion,
        parent: Option<&CollectionVersion>,
        previous: Option<&CollectionVersion>,
    ) -> Result<VersionLinks, ReverseErr> {
        Ok(VersionLinks {
            version_url: self.version_url(version)?,
            collection_url: self.collection_url(version)?,
            parent_version_url: parent.map(|v| self.version_url(v)).transpose()?,
            previous_version_url: previous.map(|v| self.version_url(v)).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models_collection::{AccessType, Owner, service::Collection};

    fn version(mnemonic: &str) -> CollectionVersion {
        let collection = Collection::new(
            Owner::organization("CIEL"),
            "malaria".to_string(),
            "Malaria".to_string(),
            AccessType::View,
            "en".to_string(),
        );
        CollectionVersion::new(&collection, mnemonic.to_string())
    }

    #[test]
    fn default_routes_match_record_urls() {
        let resolver = LinkResolver::default();
        let version = version("v1");

        assert_eq!(resolver.version_url(&version).unwrap(), version.url());
        assert_eq!(
            resolver.collection_url(&version).unwrap(),
            version.collection_url()
        );
    }

    #[test]
    fn it_links_lineage_targets() {
        let resolver = LinkResolver::default();
        let previous = version("v1");
        let links = resolver
            .links(&version("v2"), None, Some(&previous))
            .unwrap();

        assert_eq!(links.parent_version_url, None);
        assert_eq!(
            links.previous_version_url.as_deref(),
            Some("/orgs/CIEL/collections/malaria/v1/")
        );
        assert_eq!(links.version_url, "/orgs/CIEL/collections/malaria/v2/");
    }

    #[test]
    fn it_links_through_the_configured_view() {
        let resolver = LinkResolver::default()
            .with_route(
                "version-summary",
                "/api/{owner}/{collection}/versions/{version}",
            )
            .with_version_view("version-summary")
            .unwrap();

        assert_eq!(
            resolver.version_url(&version("v3")).unwrap(),
            "/api/CIEL/malaria/versions/v3"
        );
    }

    #[test]
    fn it_refuses_unknown_version_views() {
        assert_eq!(
            LinkResolver::default()
                .with_version_view("missing")
                .unwrap_err(),
            ReverseErr::UnknownView("missing".to_string())
        );
    }

    #[test]
    fn reverse_reports_missing_params() {
        let err = LinkResolver::default()
            .reverse(COLLECTION_DETAIL_VIEW, &[("owner_type", "orgs")])
            .unwrap_err();

        assert_eq!(
            err,
            ReverseErr::MissingParam {
                view: COLLECTION_DETAIL_VIEW.to_string(),
                param: "owner".to_string(),
            }
        );
    }

    #[test]
    fn reverse_reports_malformed_templates() {
        let err = LinkResolver::default()
            .with_route("broken", "/collections/{collection")
            .reverse("broken", &[("collection", "malaria")])
            .unwrap_err();

        assert_eq!(err, ReverseErr::MalformedTemplate("broken".to_string()));
    }
}
