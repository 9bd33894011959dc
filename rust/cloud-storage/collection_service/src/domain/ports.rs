//! Ports the collection domain requires, and the service it exposes

use models_collection::{
    Owner,
    api::{CollectionVersionWriteRequest, CollectionWriteRequest},
    service::{Collection, CollectionVersion, CollectionWithStats, VersionWithLinks},
};
use uuid::Uuid;

use crate::domain::models::{CollectionErr, MergedVersion, PersistErr};

/// The persistence layer for collections and their versions.
///
/// Uniqueness, lineage and release side effects are enforced here. A write that breaks
/// one of those rules is refused with [PersistErr::Rejected].
#[cfg_attr(test, mockall::automock)]
pub trait CollectionRepo: Send + Sync + 'static {
    /// every collection owned by `owner`
    fn list_collections(
        &self,
        owner: &Owner,
    ) -> impl Future<Output = anyhow::Result<Vec<Collection>>> + Send;

    fn get_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
    ) -> impl Future<Output = anyhow::Result<Option<Collection>>> + Send;

    /// store a new collection created by `created_by`, along with its HEAD version
    fn persist_new(
        &self,
        collection: Collection,
        created_by: &str,
    ) -> impl Future<Output = Result<Collection, PersistErr>> + Send;

    /// store changes made by `updated_by` to an existing collection
    fn persist_changes(
        &self,
        collection: Collection,
        updated_by: &str,
    ) -> impl Future<Output = Result<Collection, PersistErr>> + Send;

    fn list_versions(
        &self,
        collection_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<CollectionVersion>>> + Send;

    fn get_version(
        &self,
        collection_id: Uuid,
        mnemonic: &str,
    ) -> impl Future<Output = anyhow::Result<Option<CollectionVersion>>> + Send;

    fn persist_new_version(
        &self,
        version: MergedVersion,
    ) -> impl Future<Output = Result<CollectionVersion, PersistErr>> + Send;

    fn persist_version_changes(
        &self,
        version: MergedVersion,
    ) -> impl Future<Output = Result<CollectionVersion, PersistErr>> + Send;
}

/// Counts the concept references rendered as `active_concepts`
#[cfg_attr(test, mockall::automock)]
pub trait ActiveConceptCounter: Send + Sync + 'static {
    /// count of active concept references whose parent is the collection
    fn count_active_concepts(
        &self,
        collection_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

/// The api interface for reading and writing collections and collection versions
pub trait CollectionService: Send + Sync + 'static {
    fn list_collections(
        &self,
        owner: &Owner,
    ) -> impl Future<Output = Result<Vec<Collection>, CollectionErr>> + Send;

    fn get_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
    ) -> impl Future<Output = Result<CollectionWithStats, CollectionErr>> + Send;

    fn create_collection(
        &self,
        owner: &Owner,
        request: CollectionWriteRequest,
        user: &str,
    ) -> impl Future<Output = Result<CollectionWithStats, CollectionErr>> + Send;

    fn update_collection(
        &self,
        owner: &Owner,
        mnemonic: &str,
        request: CollectionWriteRequest,
        user: &str,
    ) -> impl Future<Output = Result<CollectionWithStats, CollectionErr>> + Send;

    fn list_versions(
        &self,
        owner: &Owner,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<VersionWithLinks>, CollectionErr>> + Send;

    fn get_version(
        &self,
        owner: &Owner,
        collection: &str,
        version: &str,
    ) -> impl Future<Output = Result<VersionWithLinks, CollectionErr>> + Send;

    fn create_version(
        &self,
        owner: &Owner,
        collection: &str,
        request: CollectionVersionWriteRequest,
    ) -> impl Future<Output = Result<VersionWithLinks, CollectionErr>> + Send;

    fn update_version(
        &self,
        owner: &Owner,
        collection: &str,
        version: &str,
        request: CollectionVersionWriteRequest,
    ) -> impl Future<Output = Result<VersionWithLinks, CollectionErr>> + Send;
}
