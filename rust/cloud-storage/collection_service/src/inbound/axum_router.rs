use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use models_collection::{
    Owner,
    api::{
        CollectionDetailResponse, CollectionListResponse, CollectionVersionDetailResponse,
        CollectionVersionListResponse, CollectionVersionWriteRequest, CollectionWriteRequest,
        ErrorResponse, FieldErrors,
    },
};
use serde::Deserialize;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::{models::CollectionErr, ports::CollectionService},
    inbound::{field_json::FieldJson, request_user::RequestUser},
};


/// The kind of resource owning the collections under a path
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    Users,
    Orgs,
}

impl OwnerKind {
    fn owner(self, name: String) -> Owner {
        match self {
            OwnerKind::Users => Owner::user(name),
            OwnerKind::Orgs => Owner::organization(name),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct OwnerPath {
    /// `users` or `orgs`
    owner_kind: OwnerKind,
    /// Name of the owning user or organization
    owner: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct CollectionPath {
    owner_kind: OwnerKind,
    owner: String,
    /// Collection mnemonic
    collection: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct VersionPath {
    owner_kind: OwnerKind,
    owner: String,
    collection: String,
    /// Version mnemonic
    version: String,
}

pub struct CollectionRouterState<T> {
    service: Arc<T>,
}

impl<T> Clone for CollectionRouterState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<T> CollectionRouterState<T>
where
    T: CollectionService,
{
    pub fn new(service: T) -> Self {
        CollectionRouterState {
            service: Arc::new(service),
        }
    }
}

pub fn collection_router<T, S>(state: CollectionRouterState<T>) -> Router<S>
where
    T: CollectionService,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/:owner_kind/:owner/collections",
            get(list_collections_handler::<T>).post(create_collection_handler::<T>),
        )
        .route(
            "/:owner_kind/:owner/collections/:collection",
            get(get_collection_handler::<T>).put(update_collection_handler::<T>),
        )
        .route(
            "/:owner_kind/:owner/collections/:collection/versions",
            get(list_versions_handler::<T>).post(create_version_handler::<T>),
        )
        .route(
            "/:owner_kind/:owner/collections/:collection/:version",
            get(get_version_handler::<T>).put(update_version_handler::<T>),
        )
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum CollectionHandlerErr {
    #[error("{0}")]
    NotFound(String),
    #[error("Validation error")]
    Invalid(FieldErrors),
    #[error("An internal server error has occurred")]
    Internal(anyhow::Error),
}

impl From<CollectionErr> for CollectionHandlerErr {
    fn from(err: CollectionErr) -> Self {
        match err {
            CollectionErr::NotFound(msg) => CollectionHandlerErr::NotFound(msg),
            CollectionErr::Invalid(errors) => CollectionHandlerErr::Invalid(errors),
            CollectionErr::Storage(e) => CollectionHandlerErr::Internal(e),
        }
    }
}

impl IntoResponse for CollectionHandlerErr {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        match self {
            CollectionHandlerErr::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            CollectionHandlerErr::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { message: &message }),
            )
                .into_response(),
            CollectionHandlerErr::Internal(e) => {
                tracing::error!(error=?e, "collection request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message: &message }),
                )
                    .into_response()
            }
        }
    }
}

/// Lists the collections of a user or organization
#[utoipa::path(
    get,
    tag = "collections",
    operation_id = "list_collections",
    path = "/{owner_kind}/{owner}/collections",
    params(OwnerPath),
    responses(
            (status = 200, body=Vec<CollectionListResponse>),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_collections_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    Path(OwnerPath { owner_kind, owner }): Path<OwnerPath>,
) -> Result<Json<Vec<CollectionListResponse>>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let collections = state
        .service
        .list_collections(&owner_kind.owner(owner))
        .await?;

    Ok(Json(
        collections.iter().map(CollectionListResponse::from).collect(),
    ))
}

/// Creates a collection owned by a user or organization
#[utoipa::path(
    post,
    tag = "collections",
    operation_id = "create_collection",
    path = "/{owner_kind}/{owner}/collections",
    params(OwnerPath),
    request_body = CollectionWriteRequest,
    responses(
            (status = 201, body=CollectionDetailResponse),
            (status = 400, body=FieldErrors),
            (status = 401, body=String),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_collection_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    RequestUser(user): RequestUser,
    Path(OwnerPath { owner_kind, owner }): Path<OwnerPath>,
    FieldJson(request): FieldJson<CollectionWriteRequest>,
) -> Result<(StatusCode, Json<CollectionDetailResponse>), CollectionHandlerErr>
where
    T: CollectionService,
{
    let created = state
        .service
        .create_collection(&owner_kind.owner(owner), request, &user)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Gets a collection
#[utoipa::path(
    get,
    tag = "collections",
    operation_id = "get_collection",
    path = "/{owner_kind}/{owner}/collections/{collection}",
    params(CollectionPath),
    responses(
            (status = 200, body=CollectionDetailResponse),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_collection_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    Path(CollectionPath {
        owner_kind,
        owner,
        collection,
    }): Path<CollectionPath>,
) -> Result<Json<CollectionDetailResponse>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let collection = state
        .service
        .get_collection(&owner_kind.owner(owner), &collection)
        .await?;

    Ok(Json(collection.into()))
}

/// Updates the submitted fields of a collection, absent fields keep their value
#[utoipa::path(
    put,
    tag = "collections",
    operation_id = "update_collection",
    path = "/{owner_kind}/{owner}/collections/{collection}",
    params(CollectionPath),
    request_body = CollectionWriteRequest,
    responses(
            (status = 200, body=CollectionDetailResponse),
            (status = 400, body=FieldErrors),
            (status = 401, body=String),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn update_collection_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    RequestUser(user): RequestUser,
    Path(CollectionPath {
        owner_kind,
        owner,
        collection,
    }): Path<CollectionPath>,
    FieldJson(request): FieldJson<CollectionWriteRequest>,
) -> Result<Json<CollectionDetailResponse>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let updated = state
        .service
        .update_collection(&owner_kind.owner(owner), &collection, request, &user)
        .await?;

    Ok(Json(updated.into()))
}

/// Lists the versions of a collection
#[utoipa::path(
    get,
    tag = "collections",
    operation_id = "list_collection_versions",
    path = "/{owner_kind}/{owner}/collections/{collection}/versions",
    params(CollectionPath),
    responses(
            (status = 200, body=Vec<CollectionVersionListResponse>),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_versions_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    Path(CollectionPath {
        owner_kind,
        owner,
        collection,
    }): Path<CollectionPath>,
) -> Result<Json<Vec<CollectionVersionListResponse>>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let versions = state
        .service
        .list_versions(&owner_kind.owner(owner), &collection)
        .await?;

    Ok(Json(
        versions
            .iter()
            .map(CollectionVersionListResponse::from)
            .collect(),
    ))
}

/// Creates a version of a collection
#[utoipa::path(
    post,
    tag = "collections",
    operation_id = "create_collection_version",
    path = "/{owner_kind}/{owner}/collections/{collection}/versions",
    params(CollectionPath),
    request_body = CollectionVersionWriteRequest,
    responses(
            (status = 201, body=CollectionVersionDetailResponse),
            (status = 400, body=FieldErrors),
            (status = 401, body=String),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_version_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    RequestUser(user): RequestUser,
    Path(CollectionPath {
        owner_kind,
        owner,
        collection,
    }): Path<CollectionPath>,
    FieldJson(request): FieldJson<CollectionVersionWriteRequest>,
) -> Result<(StatusCode, Json<CollectionVersionDetailResponse>), CollectionHandlerErr>
where
    T: CollectionService,
{
    let created = state
        .service
        .create_version(&owner_kind.owner(owner), &collection, request)
        .await?;
    tracing::info!(%user, version=%created.version.mnemonic, "version created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Gets a version of a collection along with its lineage links
#[utoipa::path(
    get,
    tag = "collections",
    operation_id = "get_collection_version",
    path = "/{owner_kind}/{owner}/collections/{collection}/{version}",
    params(VersionPath),
    responses(
            (status = 200, body=CollectionVersionDetailResponse),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_version_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    Path(VersionPath {
        owner_kind,
        owner,
        collection,
        version,
    }): Path<VersionPath>,
) -> Result<Json<CollectionVersionDetailResponse>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let version = state
        .service
        .get_version(&owner_kind.owner(owner), &collection, &version)
        .await?;

    Ok(Json(version.into()))
}

/// Updates the submitted fields of a version. A released version cannot be unreleased.
#[utoipa::path(
    put,
    tag = "collections",
    operation_id = "update_collection_version",
    path = "/{owner_kind}/{owner}/collections/{collection}/{version}",
    params(VersionPath),
    request_body = CollectionVersionWriteRequest,
    responses(
            (status = 200, body=CollectionVersionDetailResponse),
            (status = 400, body=FieldErrors),
            (status = 401, body=String),
            (status = 404, body=ErrorResponse),
            (status = 500, body=ErrorResponse),
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn update_version_handler<T>(
    State(state): State<CollectionRouterState<T>>,
    RequestUser(user): RequestUser,
    Path(VersionPath {
        owner_kind,
        owner,
        collection,
        version,
    }): Path<VersionPath>,
    FieldJson(request): FieldJson<CollectionVersionWriteRequest>,
) -> Result<Json<CollectionVersionDetailResponse>, CollectionHandlerErr>
where
    T: CollectionService,
{
    let updated = state
        .service
        .update_version(&owner_kind.owner(owner), &collection, &version, request)
        .await?;
    tracing::info!(%user, version=%updated.version.mnemonic, "version updated");

    Ok(Json(updated.into()))
}
