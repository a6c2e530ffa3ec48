use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use link_api::application::ports::storage_port::StoragePort;
use link_api::bootstrap::app_context::{AppContext, AppServices};
use link_api::bootstrap::config::Config;
use link_api::infrastructure::db::repositories::link_repository_memory::MemoryLinkRepository;
use link_api::infrastructure::storage::fs::FsStoragePort;
use link_api::infrastructure::storage::memory::MemoryStoragePort;
use link_api::presentation::http::api_router;

const NOT_FOUND: &str = "Error: Link content not found.";

fn app_with_storage(storage: Arc<dyn StoragePort>) -> Router {
    let cfg = Config::from_lookup(|_| None).unwrap();
    let repo = Arc::new(MemoryLinkRepository::with_items(["alpha", "beta", "gamma"]));
    let ctx = AppContext::new(cfg, AppServices::new(repo, storage));
    api_router(ctx)
}

fn app() -> Router {
    app_with_storage(Arc::new(MemoryStoragePort::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(http::header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn item_ids(v: &Value) -> Vec<i64> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn create_items_and_content_roundtrip() {
    let app = app();

    let (status, link) = send(
        &app,
        Method::POST,
        "/api/links",
        Some(json!({"name": "x", "items": [1, 2]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["name"], "x");
    let id = link["id"].as_i64().unwrap();

    let (status, items) = send(&app, Method::GET, &format!("/api/links/{id}/items"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_ids(&items), vec![1, 2]);
    assert_eq!(items[0]["name"], "alpha");

    let content_uri = format!("/api/links/{id}/content");
    let (status, body) = send(
        &app,
        Method::POST,
        &content_uri,
        Some(json!({"content": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"content": "hello"}));

    let (_, body) = send(&app, Method::GET, &content_uri, None).await;
    assert_eq!(body, json!({"content": "hello"}));

    let (status, body) = send(&app, Method::DELETE, &content_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, body) = send(&app, Method::GET, &content_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"content": NOT_FOUND}));
}

#[tokio::test]
async fn content_is_overwritten_via_put() {
    let app = app();
    let uri = "/api/links/7/content";

    send(&app, Method::POST, uri, Some(json!({"content": "one"}))).await;
    let (status, body) = send(&app, Method::PUT, uri, Some(json!({"content": "two"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "two");

    let (_, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(body, json!({"content": "two"}));
}

#[tokio::test]
async fn missing_content_reports_not_found_payload() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/links/3/content", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"content": NOT_FOUND}));

    let (status, body) = send(&app, Method::DELETE, "/api/links/3/content", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"content": NOT_FOUND}));
}

#[tokio::test]
async fn failed_write_reports_error_payload() {
    let storage = Arc::new(MemoryStoragePort::new());
    storage.set_read_only(true);
    let app = app_with_storage(storage);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/links/1/content",
        Some(json!({"content": "text"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"content": "Error: Could not write file."}));
}

#[tokio::test]
async fn content_is_written_to_links_directory() {
    let temp = TempDir::new().unwrap();
    let app = app_with_storage(Arc::new(FsStoragePort::new(temp.path())));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/links/12/content",
        Some(json!({"content": "# Notes"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let path = temp.path().join("links").join("12.md");
    assert_eq!(std::fs::read_to_string(path).unwrap(), "# Notes");
}

#[tokio::test]
async fn deleting_a_link_keeps_its_content() {
    let app = app();
    let (_, link) = send(&app, Method::POST, "/api/links", Some(json!({"name": "x"}))).await;
    let id = link["id"].as_i64().unwrap();
    let content_uri = format!("/api/links/{id}/content");
    send(&app, Method::POST, &content_uri, Some(json!({"content": "kept"}))).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/links/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(1));

    let (status, _) = send(&app, Method::GET, &format!("/api/links/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &content_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "kept");
}

#[tokio::test]
async fn delete_of_unknown_link_returns_zero() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/api/links/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(0));
}

#[tokio::test]
async fn unknown_items_are_rejected_without_creating() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/links",
        Some(json!({"name": "x", "items": [1, 42]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing"], json!([42]));

    let (_, links) = send(&app, Method::GET, "/api/links", None).await;
    assert_eq!(links, json!([]));
}

#[tokio::test]
async fn list_get_and_update() {
    let app = app();
    send(&app, Method::POST, "/api/links", Some(json!({"name": "first"}))).await;
    send(
        &app,
        Method::POST,
        "/api/links",
        Some(json!({"name": "second", "url": "https://example.com", "items": [3]})),
    )
    .await;

    let (status, links) = send(&app, Method::GET, "/api/links", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second"]);

    let (status, link) = send(&app, Method::GET, "/api/links/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["url"], "https://example.com");

    let (status, link) = send(
        &app,
        Method::PUT,
        "/api/links/2",
        Some(json!({"name": "renamed", "description": "d", "items": [1, 2]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["name"], "renamed");
    assert_eq!(link["url"], Value::Null);
    assert_eq!(link["description"], "d");

    let (_, items) = send(&app, Method::GET, "/api/links/2/items", None).await;
    assert_eq!(item_ids(&items), vec![1, 2]);
}

#[tokio::test]
async fn missing_links_are_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/links/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Link not found.");

    let (status, _) = send(&app, Method::GET, "/api/links/5/items", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/links/5",
        Some(json!({"name": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attach_items_adds_to_existing_set() {
    let app = app();
    let (_, link) = send(
        &app,
        Method::POST,
        "/api/links",
        Some(json!({"name": "x", "items": [1]})),
    )
    .await;
    let id = link["id"].as_i64().unwrap();

    let (status, items) = send(
        &app,
        Method::POST,
        &format!("/api/links/{id}/items"),
        Some(json!({"items": [3, 1]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_ids(&items), vec![1, 3]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/links/404/items",
        Some(json!({"items": [1]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/links/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
