use models_collection::{
    AccessType, OwnerType,
    api::{
        CollectionDetailResponse, CollectionListResponse, CollectionVersionDetailResponse,
        CollectionVersionListResponse, CollectionVersionWriteRequest, CollectionWriteRequest,
        ErrorResponse, FieldErrors,
    },
};
use utoipa::OpenApi;

use super::axum_router::OwnerKind;

#[derive(OpenApi)]
#[openapi(
        paths(
            super::health_handler,
            super::axum_router::list_collections_handler,
            super::axum_router::create_collection_handler,
            super::axum_router::get_collection_handler,
            super::axum_router::update_collection_handler,
            super::axum_router::list_versions_handler,
            super::axum_router::create_version_handler,
            super::axum_router::get_version_handler,
            super::axum_router::update_version_handler,
        ),
        components(
            schemas(
                AccessType,
                OwnerType,
                OwnerKind,
                CollectionWriteRequest,
                CollectionListResponse,
                CollectionDetailResponse,
                CollectionVersionWriteRequest,
                CollectionVersionListResponse,
                CollectionVersionDetailResponse,
                FieldErrors,
                ErrorResponse,
            ),
        ),
        tags(
            (name = "collections", description = "Terminology collections and their versions")
        )
    )]
pub struct ApiDoc;
