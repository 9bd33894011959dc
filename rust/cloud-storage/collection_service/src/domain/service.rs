use models_collection::{
    Owner,
    api::{CollectionVersionWriteRequest, CollectionWriteRequest, FieldErrors},
    service::{Collection, CollectionVersion, CollectionWithStats, VersionWithLinks},
};

use crate::domain::{
    links::LinkResolver,
    merge::{restore_collection, restore_version},
    models::{CollectionErr, PersistErr, SerializerSettings},
    ports::{ActiveConceptCounter, CollectionRepo, CollectionService},
    rules::{RuleTable, validate_collection, validate_version},
};


/// Implements [CollectionService] over abstracted persistence so it can be mocked
pub struct CollectionServiceImpl<R, C> {
    /// the persistence layer
    repo: R,
    /// source of the `active_concepts` count
    concepts: C,
    settings: SerializerSettings,
    links: LinkResolver,
}

impl<R, C> CollectionServiceImpl<R, C>
where
    R: CollectionRepo,
    C: ActiveConceptCounter,
{
    pub fn new(repo: R, concepts: C, settings: SerializerSettings, links: LinkResolver) -> Self {
        CollectionServiceImpl {
            repo,
            concepts,
            settings,
            links,
        }
    }

    async fn find_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
    ) -> Result<Collection, CollectionErr> {
        self.repo
            .get_collection(owner, mnemonic)
            .await?
            .ok_or_else(|| CollectionErr::NotFound(format!("Collection {mnemonic} not found")))
    }

    async fn find_version(
        &self,
        collection: &Collection,
        mnemonic: &str,
    ) -> Result<CollectionVersion, CollectionErr> {
        self.repo
            .get_version(collection.id, mnemonic)
            .await?
            .ok_or_else(|| {
                CollectionErr::NotFound(format!(
                    "Version {mnemonic} of collection {} not found",
                    collection.mnemonic
                ))
            })
    }

    async fn with_stats(
        &self,
        collection: Collection,
    ) -> Result<CollectionWithStats, CollectionErr> {
        let active_concepts = self.concepts.count_active_concepts(collection.id).await?;
        Ok(CollectionWithStats {
            collection,
            active_concepts,
        })
    }

    /// looks up a lineage target, a reference to a missing version renders as no link
    async fn lineage_target(
        &self,
        version: &CollectionVersion,
        mnemonic: Option<&str>,
    ) -> Result<Option<CollectionVersion>, CollectionErr> {
        match mnemonic {
            Some(mnemonic) => Ok(self.repo.get_version(version.collection_id, mnemonic).await?),
            None => Ok(None),
        }
    }

    async fn with_links(
        &self,
        version: CollectionVersion,
    ) -> Result<VersionWithLinks, CollectionErr> {
        let parent = self
            .lineage_target(&version, version.parent_version_mnemonic.as_deref())
            .await?;
        let previous = self
            .lineage_target(&version, version.previous_version_mnemonic.as_deref())
            .await?;

        let links = self
            .links
            .links(&version, parent.as_ref(), previous.as_ref())
            .map_err(anyhow::Error::from)?;

        Ok(VersionWithLinks { version, links })
    }
}

/// Maps the outcome of a persistence call. Only called once local validation has passed,
/// so the field errors of a rejection are the whole error map.
fn persisted<T>(outcome: Result<T, PersistErr>) -> Result<T, CollectionErr> {
    match outcome {
        Ok(record) => Ok(record),
        Err(PersistErr::Rejected(errors)) => {
            tracing::warn!(%errors, "persistence layer rejected the record");
            Err(CollectionErr::Invalid(errors))
        }
        Err(PersistErr::Storage(e)) => Err(CollectionErr::Storage(e)),
    }
}

fn rejected(errors: FieldErrors) -> CollectionErr {
    tracing::warn!(%errors, "submitted fields failed validation");
    CollectionErr::Invalid(errors)
}

impl<R, C> CollectionService for CollectionServiceImpl<R, C>
where
    R: CollectionRepo,
    C: ActiveConceptCounter,
{
    #[tracing::instrument(skip(self), err)]
    async fn list_collections(&self, owner: &Owner) -> Result<Vec<Collection>, CollectionErr> {
        Ok(self.repo.list_collections(owner).await?)
    }

    #[tracing::instrument(skip(self), err)]
    async fn get_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
    ) -> Result<CollectionWithStats, CollectionErr> {
        let collection = self.find_collection(owner, mnemonic).await?;
        self.with_stats(collection).await
    }

    #[tracing::instrument(skip(self, request), fields(id=?request.id), err)]
    async fn create_collection(
        &self,
        owner: &Owner,
        request: CollectionWriteRequest,
        user: &str,
    ) -> Result<CollectionWithStats, CollectionErr> {
        let attrs = validate_collection(request, &RuleTable::collection_create(&self.settings))
            .map_err(rejected)?;
        let collection = restore_collection(attrs, None, owner, &self.settings);

        let collection = persisted(self.repo.persist_new(collection, user).await)?;
        tracing::info!(mnemonic=%collection.mnemonic, "created collection");

        self.with_stats(collection).await
    }

    #[tracing::instrument(skip(self, request), err)]
    async fn update_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
        request: CollectionWriteRequest,
        user: &str,
    ) -> Result<CollectionWithStats, CollectionErr> {
        let attrs = validate_collection(request, &RuleTable::collection_update(&self.settings))
            .map_err(rejected)?;
        let existing = self.find_collection(owner, mnemonic).await?;
        let collection = restore_collection(attrs, Some(existing), owner, &self.settings);

        let collection = persisted(self.repo.persist_changes(collection, user).await)?;
        tracing::info!(mnemonic=%collection.mnemonic, "updated collection");

        self.with_stats(collection).await
    }

    #[tracing::instrument(skip(self), err)]
    async fn list_versions(
        &self,
        owner: &Owner,
        collection: &str,
    ) -> Result<Vec<VersionWithLinks>, CollectionErr> {
        let collection = self.find_collection(owner, collection).await?;
        let versions = self.repo.list_versions(collection.id).await?;

        // the list view carries no lineage links
        versions
            .into_iter()
            .map(|version| -> Result<VersionWithLinks, CollectionErr> {
                let links = self
                    .links
                    .links(&version, None, None)
                    .map_err(anyhow::Error::from)?;
                Ok(VersionWithLinks { version, links })
            })
            .collect()
    }

    #[tracing::instrument(skip(self), err)]
    async fn get_version(
        &self,
        owner: &Owner,
        collection: &str,
        version: &str,
    ) -> Result<VersionWithLinks, CollectionErr> {
        let collection = self.find_collection(owner, collection).await?;
        let version = self.find_version(&collection, version).await?;
        self.with_links(version).await
    }

    #[tracing::instrument(skip(self, request), fields(id=?request.id), err)]
    async fn create_version(
        &self,
        owner: &Owner,
        collection: &str,
        request: CollectionVersionWriteRequest,
    ) -> Result<VersionWithLinks, CollectionErr> {
        let attrs = validate_version(request, &RuleTable::version_create(&self.settings))
            .map_err(rejected)?;
        let collection = self.find_collection(owner, collection).await?;

        let mut errors = FieldErrors::new();
        let merged = restore_version(
            attrs,
            CollectionVersion::new(&collection, String::new()),
            &mut errors,
        );
        if !errors.is_empty() {
            return Err(rejected(errors));
        }

        let version = persisted(self.repo.persist_new_version(merged).await)?;
        tracing::info!(
            collection=%collection.mnemonic,
            version=%version.mnemonic,
            "created collection version"
        );

        self.with_links(version).await
    }

    #[tracing::instrument(skip(self, request), err)]
    async fn update_version(
        &self,
        owner: &Owner,
        collection: &str,
        version: &str,
        request: CollectionVersionWriteRequest,
    ) -> Result<VersionWithLinks, CollectionErr> {
        let attrs = validate_version(request, &RuleTable::version_update()).map_err(rejected)?;
        let collection = self.find_collection(owner, collection).await?;
        let existing = self.find_version(&collection, version).await?;

        let mut errors = FieldErrors::new();
        let merged = restore_version(attrs, existing, &mut errors);
        if !errors.is_empty() {
            return Err(rejected(errors));
        }

        let version = persisted(self.repo.persist_version_changes(merged).await)?;
        tracing::info!(
            collection=%collection.mnemonic,
            version=%version.mnemonic,
            released=version.released,
            "updated collection version"
        );

        self.with_links(version).await
    }
}
