mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;

use linkpulse::domain::repositories::LinkRepository;

fn make_server() -> (TestServer, common::TestContext) {
    let ctx = common::create_test_state();
    let server = TestServer::new(common::app(ctx.state.clone())).unwrap();
    (server, ctx)
}

// ─── SHORTEN ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_shorten_generates_code() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    let code = body["code"].as_str().unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["long_url"], "https://example.com/some/long/path");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(body["visibility"], "public");
    assert!(body["expires_at"].is_null());
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({
            "long_url": "https://example.com",
            "custom_code": "my-link_1",
            "visibility": "private"
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["code"], "my-link_1");
    assert_eq!(body["visibility"], "private");
}

#[tokio::test]
async fn test_shorten_unknown_visibility_falls_back_to_public() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com", "visibility": "secret" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["visibility"], "public");
}

#[tokio::test]
async fn test_shorten_empty_custom_code_is_generated() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com", "custom_code": "" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["code"]
            .as_str()
            .unwrap()
            .len(),
        6
    );
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let (server, _ctx) = make_server();

    let response = server.post("/shorten").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, _ctx) = make_server();

    for url in ["not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let response = server
            .post("/shorten")
            .json(&json!({ "long_url": url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_shorten_rejects_url_with_newline() {
    let (server, ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com/a\nb", "custom_code": "nlcode" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
    assert!(ctx.links.find_by_code("nlcode").await.unwrap().is_none());

    server.get("/nlcode").await.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_malformed_json_is_structured_error() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .bytes("{\"long_url\": ".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_shorten_without_json_content_type_is_structured_error() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .text(r#"{"long_url": "https://example.com"}"#)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_shorten_metrics_code_is_reserved() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com", "custom_code": "metrics" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_invalid_custom_code() {
    let (server, _ctx) = make_server();

    for code in ["ab", "has space", "slash/code", &"x".repeat(33)] {
        let response = server
            .post("/shorten")
            .json(&json!({ "long_url": "https://example.com", "custom_code": code }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_shorten_reserved_custom_code() {
    let (server, _ctx) = make_server();

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com", "custom_code": "health" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "taken", "https://first.example.com", None).await;

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "https://second.example.com", "custom_code": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["message"], "Custom code already exists");

    let stored = ctx.links.find_by_code("taken").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://first.example.com");
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_empty() {
    let (server, _ctx) = make_server();

    let response = server.get("/all").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), json!([]));
}

#[tokio::test]
async fn test_list_hides_expired_links() {
    let (server, ctx) = make_server();
    let now = Utc::now();
    common::insert_link(&ctx.links, "alive1", "https://a.example.com", None).await;
    common::insert_link(
        &ctx.links,
        "later1",
        "https://b.example.com",
        Some(now + Duration::hours(1)),
    )
    .await;
    common::insert_link(
        &ctx.links,
        "gone01",
        "https://c.example.com",
        Some(now - Duration::hours(1)),
    )
    .await;

    let response = server.get("/all").await;

    response.assert_status_ok();
    let body = response.json::<Vec<serde_json::Value>>();
    let codes: Vec<&str> = body.iter().map(|l| l["code"].as_str().unwrap()).collect();

    assert_eq!(codes.len(), 2);
    assert!(codes.contains(&"alive1"));
    assert!(codes.contains(&"later1"));
    assert!(!codes.contains(&"gone01"));
}

#[tokio::test]
async fn test_list_after_shorten() {
    let (server, _ctx) = make_server();

    server
        .post("/shorten")
        .json(&json!({ "long_url": "https://example.com", "custom_code": "listed" }))
        .await
        .assert_status_ok();

    let body = server.get("/all").await.json::<Vec<serde_json::Value>>();

    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["code"], "listed");
    assert_eq!(body[0]["short_url"], format!("{}/listed", common::BASE_URL));
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_link() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "upd001", "https://old.example.com", None).await;

    let response = server
        .put("/update/upd001")
        .json(&json!({ "long_url": "https://new.example.com", "visibility": "private" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["code"], "upd001");
    assert_eq!(body["long_url"], "https://new.example.com");
    assert_eq!(body["visibility"], "private");

    let stored = ctx.links.find_by_code("upd001").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://new.example.com");
}

#[tokio::test]
async fn test_update_link_not_found() {
    let (server, _ctx) = make_server();

    let response = server
        .put("/update/missing")
        .json(&json!({ "long_url": "https://new.example.com" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_link_invalid_url() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "upd002", "https://old.example.com", None).await;

    let response = server
        .put("/update/upd002")
        .json(&json!({ "long_url": "nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let stored = ctx.links.find_by_code("upd002").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://old.example.com");
}

#[tokio::test]
async fn test_update_link_rejects_url_with_newline() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "upd003", "https://old.example.com", None).await;

    let response = server
        .put("/update/upd003")
        .json(&json!({ "long_url": "https://example.com/a\nb" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    server.get("/upd003").await.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_update_link_malformed_json_is_structured_error() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "upd004", "https://old.example.com", None).await;

    let response = server
        .put("/update/upd004")
        .bytes("not json".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "del001", "https://example.com", None).await;

    let response = server.delete("/delete/del001").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["message"],
        "deleted successfully"
    );
    assert!(ctx.links.find_by_code("del001").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_link_twice() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "del002", "https://example.com", None).await;

    server.delete("/delete/del002").await.assert_status_ok();
    server.delete("/delete/del002").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_keeps_visits() {
    let (server, ctx) = make_server();
    common::insert_link(&ctx.links, "del003", "https://example.com", None).await;
    common::insert_visit(&ctx.visits, "del003", Utc::now()).await;

    server.delete("/delete/del003").await.assert_status_ok();

    let body = server
        .get("/analytics/del003")
        .await
        .json::<Vec<serde_json::Value>>();
    assert_eq!(body.len(), 1);
}
