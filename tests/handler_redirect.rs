mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{create_test_context, create_test_server, insert_url, test_now};
use serde_json::Value;

#[tokio::test]
async fn test_redirect_to_original_url() {
    let ctx = create_test_context();
    let record = insert_url(&ctx.repository, "https://example.com/landing?x=1", None).await;
    let server = create_test_server(ctx.state);

    let response = server
        .get(&format!("/{}", record.short_code().unwrap()))
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://example.com/landing?x=1"
    );
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let ctx = create_test_context();
    let server = create_test_server(ctx.state);

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["message"], "Short URL not found: nonexistent");
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let ctx = create_test_context();
    let server = create_test_server(ctx.state);

    let response = server.get("/not_base62").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_stops_once_expired() {
    let ctx = create_test_context();
    let record = insert_url(
        &ctx.repository,
        "https://example.com",
        Some(test_now() + Duration::minutes(1)),
    )
    .await;
    let code = record.short_code().unwrap();
    let clock = ctx.clock.clone();
    let server = create_test_server(ctx.state);

    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);

    clock.advance(Duration::minutes(1));

    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
