//! In-memory persistence layer.
//!
//! Plays the role of the model layer for the binary and for integration tests. Mnemonic
//! uniqueness, lineage references and release side effects are enforced here.

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use chrono::Utc;
use models_collection::{
    Owner,
    api::FieldErrors,
    service::{Collection, CollectionVersion},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    models::{MergedVersion, PersistErr},
    ports::{ActiveConceptCounter, CollectionRepo},
};


/// A concept placed in a collection. Only active references count towards `active_concepts`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptReference {
    pub collection_id: Uuid,
    pub expression: String,
    pub active: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    collections: HashMap<Uuid, Collection>,
    /// versions keyed by the id of their collection, in creation order
    versions: HashMap<Uuid, Vec<CollectionVersion>>,
    concept_references: Vec<ConceptReference>,
}

/// Which lineage back reference of a version is being checked
#[derive(Debug, Clone, Copy)]
enum Lineage {
    Previous,
    Parent,
}

impl Lineage {
    fn field(self) -> &'static str {
        match self {
            Lineage::Previous => "previous_version",
            Lineage::Parent => "parent_version",
        }
    }

    fn of(self, version: &CollectionVersion) -> Option<&str> {
        match self {
            Lineage::Previous => version.previous_version_mnemonic.as_deref(),
            Lineage::Parent => version.parent_version_mnemonic.as_deref(),
        }
    }
}

impl StoreState {
    fn mnemonic_taken(&self, owner: &Owner, mnemonic: &str, except: Option<Uuid>) -> bool {
        self.collections
            .values()
            .any(|c| Some(c.id) != except && &c.owner == owner && c.mnemonic == mnemonic)
    }

    /// Check the back references of `version` against its siblings
    fn check_lineage(&self, version: &CollectionVersion, errors: &mut FieldErrors) {
        let siblings = self
            .versions
            .get(&version.collection_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let find = |mnemonic: &str| {
            siblings
                .iter()
                .find(|v| v.id != version.id && v.mnemonic == mnemonic)
        };

        for lineage in [Lineage::Previous, Lineage::Parent] {
            let Some(target) = lineage.of(version) else {
                continue;
            };
            if target == version.mnemonic {
                errors.add(lineage.field(), "A version cannot reference itself.");
                continue;
            }
            if find(target).is_none() {
                errors.add(lineage.field(), format!("Version {target} does not exist."));
                continue;
            }

            // walk the chain from the target, it must never lead back to this version
            let mut seen = vec![target];
            let mut next = find(target).and_then(|v| lineage.of(v));
            while let Some(mnemonic) = next {
                if mnemonic == version.mnemonic {
                    errors.add(lineage.field(), "Version lineage cannot contain a cycle.");
                    break;
                }
                if seen.contains(&mnemonic) {
                    break;
                }
                seen.push(mnemonic);
                next = find(mnemonic).and_then(|v| lineage.of(v));
            }
        }
    }

    /// Store `version`, unreleasing its siblings when it has just been released.
    /// Nothing is written unless the collection and, for an update, the stored version exist.
    fn store_version(
        &mut self,
        merged: MergedVersion,
        is_new: bool,
    ) -> anyhow::Result<CollectionVersion> {
        let MergedVersion {
            mut version,
            was_released,
        } = merged;

        let collection = self
            .collections
            .get_mut(&version.collection_id)
            .with_context(|| format!("collection {} does not exist", version.collection_id))?;
        let siblings = self.versions.entry(version.collection_id).or_default();
        let stored = if is_new {
            None
        } else {
            let index = siblings
                .iter()
                .position(|v| v.id == version.id)
                .with_context(|| format!("version {} does not exist", version.id))?;
            Some(index)
        };

        let now = Utc::now();
        version.updated_at = now;
        if version.released && !was_released {
            for sibling in siblings.iter_mut().filter(|v| v.id != version.id && v.released) {
                sibling.released = false;
                sibling.updated_at = now;
            }
        }

        match stored {
            Some(index) => {
                let previous_mnemonic = std::mem::replace(&mut siblings[index], version.clone())
                    .mnemonic;
                if previous_mnemonic != version.mnemonic {
                    rename_references(siblings, &previous_mnemonic, &version.mnemonic);
                }
            }
            None => {
                version.created_at = now;
                siblings.push(version.clone());
                collection.num_versions += 1;
            }
        }

        Ok(version)
    }
}

/// Point the lineage references of `versions` at a renamed sibling
fn rename_references(versions: &mut [CollectionVersion], from: &str, to: &str) {
    for version in versions.iter_mut() {
        for reference in [
            &mut version.previous_version_mnemonic,
            &mut version.parent_version_mnemonic,
        ] {
            if reference.as_deref() == Some(from) {
                *reference = Some(to.to_string());
            }
        }
    }
}

/// Collections, versions and concept references held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollectionStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a concept in a collection
    pub async fn add_concept_reference(&self, reference: ConceptReference) {
        self.state.write().await.concept_references.push(reference);
    }
}

impl CollectionRepo for InMemoryCollectionStore {
    async fn list_collections(&self, owner: &Owner) -> anyhow::Result<Vec<Collection>> {
        let state = self.state.read().await;
        let mut collections: Vec<Collection> = state
            .collections
            .values()
            .filter(|c| &c.owner == owner)
            .cloned()
            .collect();
        collections.sort_by(|a, b| a.mnemonic.cmp(&b.mnemonic));
        Ok(collections)
    }

    async fn get_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
    ) -> anyhow::Result<Option<Collection>> {
        let state = self.state.read().await;
        Ok(state
            .collections
            .values()
            .find(|c| &c.owner == owner && c.mnemonic == mnemonic)
            .cloned())
    }

    #[tracing::instrument(skip(self, collection), fields(mnemonic=%collection.mnemonic))]
    async fn persist_new(
        &self,
        mut collection: Collection,
        created_by: &str,
    ) -> Result<Collection, PersistErr> {
        let mut state = self.state.write().await;
        if state.mnemonic_taken(&collection.owner, &collection.mnemonic, None) {
            return Err(PersistErr::Rejected(FieldErrors::from_iter([(
                "mnemonic",
                format!(
                    "Collection with mnemonic {} already exists for {}.",
                    collection.mnemonic, collection.owner.name
                ),
            )])));
        }

        let now = Utc::now();
        collection.created_by = Some(created_by.to_string());
        collection.updated_by = Some(created_by.to_string());
        collection.created_at = now;
        collection.updated_at = now;
        collection.num_versions = 1;

        let head = CollectionVersion::new(&collection, CollectionVersion::HEAD.to_string());
        state.versions.insert(collection.id, vec![head]);
        state.collections.insert(collection.id, collection.clone());

        Ok(collection)
    }

    #[tracing::instrument(skip(self, collection), fields(mnemonic=%collection.mnemonic))]
    async fn persist_changes(
        &self,
        mut collection: Collection,
        updated_by: &str,
    ) -> Result<Collection, PersistErr> {
        let mut state = self.state.write().await;
        if state.mnemonic_taken(&collection.owner, &collection.mnemonic, Some(collection.id)) {
            return Err(PersistErr::Rejected(FieldErrors::from_iter([(
                "mnemonic",
                format!(
                    "Collection with mnemonic {} already exists for {}.",
                    collection.mnemonic, collection.owner.name
                ),
            )])));
        }

        let stored = state
            .collections
            .get_mut(&collection.id)
            .with_context(|| format!("collection {} does not exist", collection.id))?;
        collection.updated_by = Some(updated_by.to_string());
        collection.updated_at = Utc::now();
        // versions are counted by the store, never by the client
        collection.num_versions = stored.num_versions;
        *stored = collection.clone();

        // keep version urls pointing at the renamed collection
        if let Some(versions) = state.versions.get_mut(&collection.id) {
            for version in versions.iter_mut() {
                version.collection_mnemonic = collection.mnemonic.clone();
            }
        }

        Ok(collection)
    }

    async fn list_versions(&self, collection_id: Uuid) -> anyhow::Result<Vec<CollectionVersion>> {
        let state = self.state.read().await;
        Ok(state
            .versions
            .get(&collection_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_version(
        &self,
        collection_id: Uuid,
        mnemonic: &str,
    ) -> anyhow::Result<Option<CollectionVersion>> {
        let state = self.state.read().await;
        Ok(state
            .versions
            .get(&collection_id)
            .and_then(|versions| versions.iter().find(|v| v.mnemonic == mnemonic))
            .cloned())
    }

    #[tracing::instrument(skip(self, merged), fields(mnemonic=%merged.version.mnemonic))]
    async fn persist_new_version(
        &self,
        merged: MergedVersion,
    ) -> Result<CollectionVersion, PersistErr> {
        let mut state = self.state.write().await;
        let version = &merged.version;

        let mut errors = FieldErrors::new();
        let duplicate = state
            .versions
            .get(&version.collection_id)
            .is_some_and(|versions| versions.iter().any(|v| v.mnemonic == version.mnemonic));
        if duplicate {
            errors.add(
                "mnemonic",
                format!(
                    "Version with mnemonic {} already exists for collection {}.",
                    version.mnemonic, version.collection_mnemonic
                ),
            );
        }
        state.check_lineage(version, &mut errors);
        if !errors.is_empty() {
            return Err(PersistErr::Rejected(errors));
        }

        Ok(state.store_version(merged, true)?)
    }

    #[tracing::instrument(skip(self, merged), fields(mnemonic=%merged.version.mnemonic))]
    async fn persist_version_changes(
        &self,
        merged: MergedVersion,
    ) -> Result<CollectionVersion, PersistErr> {
        let mut state = self.state.write().await;
        let version = &merged.version;

        let mut errors = FieldErrors::new();
        let duplicate = state
            .versions
            .get(&version.collection_id)
            .is_some_and(|versions| {
                versions
                    .iter()
                    .any(|v| v.id != version.id && v.mnemonic == version.mnemonic)
            });
        if duplicate {
            errors.add(
                "mnemonic",
                format!(
                    "Version with mnemonic {} already exists for collection {}.",
                    version.mnemonic, version.collection_mnemonic
                ),
            );
        }
        state.check_lineage(version, &mut errors);
        if !errors.is_empty() {
            return Err(PersistErr::Rejected(errors));
        }

        Ok(state.store_version(merged, false)?)
    }
}

impl ActiveConceptCounter for InMemoryCollectionStore {
    async fn count_active_concepts(&self, collection_id: Uuid) -> anyhow::Result<u64> {
        let state = self.state.read().await;
        Ok(state
            .concept_references
            .iter()
            .filter(|r| r.collection_id == collection_id && r.active)
            .count() as u64)
    }
}
