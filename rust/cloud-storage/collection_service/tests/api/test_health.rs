use crate::common::test_server;

#[tokio::test]
async fn test_health_check() {
    let (server, _) = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_collection_routes() {
    let (server, _) = test_server();

    let response = server.get("/api-doc/openapi.json").await;

    response.assert_status_ok();
    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/{owner_kind}/{owner}/collections"].is_object());
    assert!(doc["paths"]["/{owner_kind}/{owner}/collections/{collection}/{version}"].is_object());
}
