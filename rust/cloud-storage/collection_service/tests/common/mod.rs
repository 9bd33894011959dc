use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use collection_service::{
    config::Config, domain::service::CollectionServiceImpl, inbound::app,
    outbound::memory::InMemoryCollectionStore,
};
use serde_json::{Value, json};

pub const USER_ID: HeaderName = HeaderName::from_static("x-user-id");

pub fn admin() -> HeaderValue {
    HeaderValue::from_static("admin")
}

/// A server backed by a fresh in-memory store, configured with the default settings
pub fn test_server() -> (TestServer, InMemoryCollectionStore) {
    let config = Config::from_lookup(|_| None).unwrap();
    let store = InMemoryCollectionStore::new();
    let service = CollectionServiceImpl::new(
        store.clone(),
        store.clone(),
        config.serializer_settings(),
        config.link_resolver().unwrap(),
    );
    (TestServer::new(app(service)).unwrap(), store)
}

/// Create the CIEL malaria collection and return its detail
pub async fn create_malaria(server: &TestServer) -> Value {
    let response = server
        .post("/orgs/CIEL/collections")
        .add_header(USER_ID, admin())
        .json(&json!({
            "id": "malaria",
            "name": "Malaria",
            "full_name": "Malaria concepts",
            "supported_locales": "en,fr,es",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
