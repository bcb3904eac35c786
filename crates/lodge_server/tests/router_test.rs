//! Router tests against an in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use lodge_cache::QueryCacheConfig;
use lodge_content::{ContentService, InMemoryContentStore};
use lodge_core::{Block, BlockKind, Page, PageBuilder, PageTemplate};
use lodge_server::{AppState, create_router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const KEY: &str = "test-service-key";

struct Fixture {
    store: Arc<InMemoryContentStore>,
    router: Router,
    page: Page,
    blocks: Vec<Block>,
}

fn fixture_with_key(service_key: Option<&str>) -> Fixture {
    let store = Arc::new(InMemoryContentStore::new());
    let page = store.add_page(
        PageBuilder::default()
            .slug("home")
            .name("Home")
            .template(PageTemplate::Home)
            .priority(1)
            .build()
            .unwrap(),
    );
    store.add_page(
        PageBuilder::default()
            .slug("suites")
            .name("Suites")
            .template(PageTemplate::Suites)
            .priority(2)
            .build()
            .unwrap(),
    );

    let mut hero = Block::draft(
        page.id,
        BlockKind::HeroImage,
        1,
        json!({"title": "Welcome", "background_image": "/img/hero.jpg"}),
    );
    hero.published = Some(hero.payload.clone());
    let blocks = vec![
        store.add_block(hero),
        store.add_block(Block::draft(page.id, BlockKind::RichText, 2, json!({"body": "Two"}))),
        store.add_block(Block::draft(page.id, BlockKind::RichText, 3, json!({"body": "Three"}))),
    ];

    let content = Arc::new(ContentService::new(store.clone(), QueryCacheConfig::default()));
    let state = AppState::new(content, service_key.map(Arc::from), "https://lodge.example");

    Fixture {
        store,
        router: create_router(state),
        page,
        blocks,
    }
}

fn fixture() -> Fixture {
    fixture_with_key(Some(KEY))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn admin(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {KEY}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_pages_listing_is_a_query_state() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/api/pages")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_loading"], false);
    assert!(body["error"].is_null());
    let slugs: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["home", "suites"]);
}

#[tokio::test]
async fn test_missing_page_is_a_placeholder() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/api/pages/gallery")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"]["slug"], "gallery");
    assert_eq!(body["data"]["page"]["id"], uuid::Uuid::nil().to_string());
    assert_eq!(body["data"]["blocks"], json!([]));
}

#[tokio::test]
async fn test_public_blocks_are_published_only() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/api/pages/home/blocks")).await;

    assert_eq!(status, StatusCode::OK);
    let blocks = body["data"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["id"], f.blocks[0].id.to_string());
    assert_eq!(blocks[0]["type"], "hero-image");
}

#[tokio::test]
async fn test_admin_routes_require_the_service_key() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/api/admin/pages/home")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().unwrap().contains("Unauthorized"));

    let wrong = Request::builder()
        .uri("/api/admin/pages/home")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&f.router, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&f.router, admin(Method::GET, "/api/admin/pages/home", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blocks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_admin_routes_are_closed_without_a_configured_key() {
    let f = fixture_with_key(None);

    let (status, _) = send(&f.router, admin(Method::GET, "/api/admin/pages/home", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_read_of_missing_page_is_not_found() {
    let f = fixture();

    let (status, _) = send(&f.router, admin(Method::GET, "/api/admin/pages/gallery", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_persists_new_order() {
    let f = fixture();
    let uri = format!("/api/admin/pages/{}/order", f.page.id);

    let (status, body) = send(
        &f.router,
        admin(Method::PUT, &uri, Some(json!({"from": 0, "to": 2}))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["changed"], true);
    let stored: Vec<_> = f.store.blocks_of(f.page.id).iter().map(|b| b.id).collect();
    assert_eq!(stored, vec![f.blocks[1].id, f.blocks[2].id, f.blocks[0].id]);
}

#[tokio::test]
async fn test_reorder_out_of_range_is_a_bad_request() {
    let f = fixture();
    let uri = format!("/api/admin/pages/{}/order", f.page.id);

    let (status, _) = send(
        &f.router,
        admin(Method::PUT, &uri, Some(json!({"from": 0, "to": 9}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(f.store.calls("write_block_positions"), 0);
}

#[tokio::test]
async fn test_invalid_draft_answers_422_with_fields() {
    let f = fixture();
    let uri = format!("/api/admin/blocks/{}", f.blocks[1].id);

    let (status, body) = send(
        &f.router,
        admin(
            Method::PUT,
            &uri,
            Some(json!({"type": "split-block", "payload": {"title": "Forest"}})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["data"].is_null());
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"description"));
    assert_eq!(f.store.calls("save_draft"), 0);
}

#[tokio::test]
async fn test_save_then_publish_reaches_public_route() {
    let f = fixture();
    let block_id = f.blocks[1].id;

    let (status, _) = send(
        &f.router,
        admin(
            Method::PUT,
            &format!("/api/admin/blocks/{block_id}"),
            Some(json!({"type": "rich-text", "payload": {"body": "Fresh copy"}})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &f.router,
        admin(Method::POST, &format!("/api/admin/blocks/{block_id}/publish"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["published"]["body"], "Fresh copy");

    let (_, body) = send(&f.router, get("/api/pages/home/blocks")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &f.router,
        admin(Method::POST, &format!("/api/admin/blocks/{block_id}/unpublish"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&f.router, get("/api/pages/home/blocks")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_publishing_unknown_block_is_not_found() {
    let f = fixture();
    let uri = format!("/api/admin/blocks/{}/publish", uuid::Uuid::new_v4());

    let (status, _) = send(&f.router, admin(Method::POST, &uri, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_sets_error_field() {
    let f = fixture();
    f.store.set_failure(Some("connection reset"));

    let (status, body) = send(&f.router, get("/api/suites")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["data"].is_null());
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn test_sitemap_lists_pages() {
    let f = fixture();

    let response = f.router.clone().oneshot(get("/sitemap.xml")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(xml.contains("<loc>https://lodge.example/</loc>"));
    assert!(xml.contains("<loc>https://lodge.example/suites</loc>"));
}

#[tokio::test]
async fn test_debug_env_reports_presence_only() {
    let f = fixture();

    let (status, body) = send(&f.router, get("/debug/env")).await;

    assert_eq!(status, StatusCode::OK);
    let report = body.as_object().unwrap();
    assert!(report.contains_key("DATABASE_URL"));
    assert!(report.contains_key("LODGE_SERVICE_KEY"));
    assert!(report.values().all(Value::is_boolean));
}
