use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{USER_ID, admin, create_malaria, test_server};

const VERSIONS: &str = "/orgs/CIEL/collections/malaria/versions";

#[tokio::test]
async fn test_new_collection_lists_its_head_version() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server.get(VERSIONS).await;

    response.assert_status_ok();
    response.assert_json(&json!([{
        "id": "HEAD",
        "released": false,
        "owner": "CIEL",
        "owner_type": "Organization",
        "owner_url": "/orgs/CIEL/",
        "version_url": "/orgs/CIEL/collections/malaria/HEAD/",
        "url": "/orgs/CIEL/collections/malaria/",
    }]));
}

#[tokio::test]
async fn test_create_version_links_its_lineage() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({
            "id": "v1",
            "description": "First release",
            "previous_version": "HEAD",
            "parent_version": "HEAD",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["type"], "Collection Version");
    assert_eq!(body["id"], "v1");
    assert_eq!(body["released"], false);
    assert_eq!(body["version_url"], "/orgs/CIEL/collections/malaria/v1/");
    assert_eq!(body["collectionUrl"], "/orgs/CIEL/collections/malaria/");
    assert_eq!(body["previousVersionUrl"], "/orgs/CIEL/collections/malaria/HEAD/");
    assert_eq!(body["parentVersionUrl"], "/orgs/CIEL/collections/malaria/HEAD/");

    let collection: Value = server.get("/orgs/CIEL/collections/malaria").await.json();
    assert_eq!(collection["versions"], 2);
}

#[tokio::test]
async fn test_version_without_lineage_renders_null_links() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let body: Value = server
        .get("/orgs/CIEL/collections/malaria/HEAD")
        .await
        .json();

    assert_eq!(body["parentVersionUrl"], Value::Null);
    assert_eq!(body["previousVersionUrl"], Value::Null);
}

#[tokio::test]
async fn test_create_version_rejects_dangling_lineage() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "v2", "previous_version": "v1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "previous_version": ["Version v1 does not exist."] }));
}

#[tokio::test]
async fn test_create_version_requires_a_valid_id() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "v 1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "id": ["Enter a valid value."] }));
}

#[tokio::test]
async fn test_released_version_cannot_be_unreleased() {
    let (server, _) = test_server();
    create_malaria(&server).await;
    server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "v1", "released": true }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .put("/orgs/CIEL/collections/malaria/v1")
        .add_header(USER_ID, admin())
        .json(&json!({ "released": false, "description": "withdrawn" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "released": ["Cannot set this field to \"false\".  (Releasing another version will cause this field to become false.)"]
    }));

    let body: Value = server.get("/orgs/CIEL/collections/malaria/v1").await.json();
    assert_eq!(body["released"], true);
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn test_releasing_a_version_unreleases_the_previous_release() {
    let (server, _) = test_server();
    create_malaria(&server).await;
    for id in ["v1", "v2"] {
        server
            .post(VERSIONS)
            .add_header(USER_ID, admin())
            .json(&json!({ "id": id }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    for id in ["v1", "v2"] {
        server
            .put(&format!("/orgs/CIEL/collections/malaria/{id}"))
            .add_header(USER_ID, admin())
            .json(&json!({ "released": true }))
            .await
            .assert_status_ok();
    }

    let versions: Vec<Value> = server.get(VERSIONS).await.json();
    let released: Vec<&str> = versions
        .iter()
        .filter(|v| v["released"] == true)
        .filter_map(|v| v["id"].as_str())
        .collect();
    assert_eq!(released, vec!["v2"]);
}

#[tokio::test]
async fn test_unknown_version_is_not_found() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server.get("/orgs/CIEL/collections/malaria/v9").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "message": "Version v9 of collection malaria not found" }));
}

#[tokio::test]
async fn test_mistyped_fields_are_field_errors() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "v1", "released": "yes" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["released"].is_array());
}

#[tokio::test]
async fn test_versions_cannot_be_named_after_the_version_list() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post(VERSIONS)
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "versions" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "id": ["versions is a reserved name."] }));
}

#[tokio::test]
async fn test_renamed_versions_keep_their_successors_linked() {
    let (server, _) = test_server();
    create_malaria(&server).await;
    for body in [
        json!({ "id": "v1" }),
        json!({ "id": "v2", "previous_version": "v1" }),
    ] {
        server
            .post(VERSIONS)
            .add_header(USER_ID, admin())
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);
    }

    server
        .put("/orgs/CIEL/collections/malaria/v1")
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "v1.0" }))
        .await
        .assert_status_ok();

    let v2: Value = server.get("/orgs/CIEL/collections/malaria/v2").await.json();
    assert_eq!(
        v2["previousVersionUrl"],
        "/orgs/CIEL/collections/malaria/v1.0/"
    );
}
