use axum::http::StatusCode;
use collection_service::outbound::memory::ConceptReference;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::{USER_ID, admin, create_malaria, test_server};

#[tokio::test]
async fn test_create_collection_renders_detail() {
    let (server, _) = test_server();

    let body = create_malaria(&server).await;

    assert_eq!(body["type"], "Collection");
    assert_eq!(body["id"], "malaria");
    assert_eq!(body["name"], "Malaria");
    assert_eq!(body["full_name"], "Malaria concepts");
    assert_eq!(body["public_access"], "View");
    assert_eq!(body["default_locale"], "en");
    assert_eq!(body["versions"], 1);
    assert_eq!(body["versions_url"], "/orgs/CIEL/collections/malaria/versions/");
    assert_eq!(body["concepts_url"], "/orgs/CIEL/collections/malaria/concepts/");
    assert_eq!(body["created_by"], "admin");
    assert_eq!(body["updated_by"], "admin");

    let locales: Vec<&str> = body["supported_locales"]
        .as_str()
        .unwrap()
        .split(',')
        .collect();
    assert_eq!(locales.len(), 3);
    for locale in ["en", "fr", "es"] {
        assert!(locales.contains(&locale));
    }
}

#[tokio::test]
async fn test_create_collection_rejects_invalid_fields() {
    let (server, _) = test_server();

    let response = server
        .post("/orgs/CIEL/collections")
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "malaria collection", "public_access": "Private" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "id": ["Enter a valid value."],
        "name": ["This field is required."],
        "public_access": ["Select a valid choice. Private is not one of the available choices."],
    }));

    server
        .get("/orgs/CIEL/collections")
        .await
        .assert_json(&json!([]));
}

#[tokio::test]
async fn test_duplicate_mnemonic_is_a_field_error() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .post("/orgs/CIEL/collections")
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "malaria", "name": "Malaria again" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let errors: Value = response.json();
    assert!(errors["mnemonic"].is_array());
}

#[tokio::test]
async fn test_list_collections_per_owner() {
    let (server, _) = test_server();
    create_malaria(&server).await;
    server
        .post("/users/jdoe/collections")
        .add_header(USER_ID, admin())
        .json(&json!({ "id": "dengue", "name": "Dengue" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/orgs/CIEL/collections").await;

    response.assert_status_ok();
    response.assert_json(&json!([{
        "id": "malaria",
        "name": "Malaria",
        "url": "/orgs/CIEL/collections/malaria/",
        "owner": "CIEL",
        "owner_type": "Organization",
        "owner_url": "/orgs/CIEL/",
    }]));
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() {
    let (server, _) = test_server();
    create_malaria(&server).await;

    let response = server
        .put("/orgs/CIEL/collections/malaria")
        .add_header(USER_ID, axum::http::HeaderValue::from_static("editor"))
        .json(&json!({ "description": "Concepts for malaria programs", "public_access": "Edit" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["description"], "Concepts for malaria programs");
    assert_eq!(body["public_access"], "Edit");
    assert_eq!(body["name"], "Malaria");
    assert_eq!(body["full_name"], "Malaria concepts");
    assert_eq!(body["created_by"], "admin");
    assert_eq!(body["updated_by"], "editor");
}

#[tokio::test]
async fn test_update_unknown_collection_is_not_found() {
    let (server, _) = test_server();

    let response = server
        .put("/orgs/CIEL/collections/dengue")
        .add_header(USER_ID, admin())
        .json(&json!({ "name": "Dengue" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "message": "Collection dengue not found" }));
}

#[tokio::test]
async fn test_detail_counts_active_concepts() {
    let (server, store) = test_server();
    let created = create_malaria(&server).await;
    let collection_id: Uuid = created["uuid"].as_str().unwrap().parse().unwrap();

    for active in [true, true, false] {
        store
            .add_concept_reference(ConceptReference {
                collection_id,
                expression: format!("/orgs/CIEL/sources/CIEL/concepts/{}/", Uuid::new_v4()),
                active,
            })
            .await;
    }

    let body: Value = server.get("/orgs/CIEL/collections/malaria").await.json();
    assert_eq!(body["active_concepts"], 2);
}
