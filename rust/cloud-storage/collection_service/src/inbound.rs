use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::{
    domain::ports::CollectionService,
    inbound::{
        axum_router::{CollectionRouterState, collection_router},
        swagger::ApiDoc,
    },
};

pub mod axum_router;
pub mod field_json;
pub mod request_user;
pub mod swagger;

/// Health check
#[utoipa::path(
        get,
        path = "/health",
        responses(
            (status = 200, description = "health", body = String),
        )
    )]
pub async fn health_handler() -> String {
    "healthy".to_string()
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The complete http application serving `service`
pub fn app<T>(service: T) -> Router
where
    T: CollectionService,
{
    Router::new()
        .merge(collection_router(CollectionRouterState::new(service)))
        .route("/health", get(health_handler))
        .route("/api-doc/openapi.json", get(openapi_handler))
        .layer(TraceLayer::new_for_http())
}
