mod common;

use chrono::Duration as ChronoDuration;
use common::{create_test_context, insert_url, test_now};
use shorturl::domain::expiry_reaper::ExpiryReaper;
use shorturl::domain::repositories::UrlRepository;
use shorturl::error::AppError;
use std::time::Duration;

#[tokio::test]
async fn test_expired_url_is_unreachable_before_purge() {
    let ctx = create_test_context();
    let record = insert_url(
        &ctx.repository,
        "https://example.com",
        Some(test_now() + ChronoDuration::seconds(30)),
    )
    .await;
    let code = record.short_code().unwrap();

    assert!(ctx.state.url_service.resolve(&code).await.is_ok());

    ctx.clock.advance(ChronoDuration::seconds(31));

    let result = ctx.state.url_service.resolve(&code).await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert!(ctx.repository.find_by_id(record.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_run_once_removes_only_expired_urls() {
    let ctx = create_test_context();
    let expired = insert_url(
        &ctx.repository,
        "https://expired.com",
        Some(test_now() + ChronoDuration::minutes(5)),
    )
    .await;
    let live = insert_url(
        &ctx.repository,
        "https://live.com",
        Some(test_now() + ChronoDuration::days(1)),
    )
    .await;
    let permanent = insert_url(&ctx.repository, "https://permanent.com", None).await;

    ctx.clock.advance(ChronoDuration::minutes(10));

    let reaper = ExpiryReaper::new(
        ctx.repository.clone(),
        ctx.clock.clone(),
        Duration::from_secs(60),
    );

    assert_eq!(reaper.run_once().await.unwrap(), 1);
    assert!(ctx.repository.find_by_id(expired.id).await.unwrap().is_none());
    assert!(ctx.repository.find_by_id(live.id).await.unwrap().is_some());
    assert!(ctx.repository.find_by_id(permanent.id).await.unwrap().is_some());

    assert_eq!(reaper.run_once().await.unwrap(), 0);
}

#[tokio::test]
async fn test_purged_url_is_not_reused_by_create() {
    let ctx = create_test_context();
    let expiry = test_now() + ChronoDuration::minutes(1);
    let first = insert_url(&ctx.repository, "https://example.com", Some(expiry)).await;

    ctx.clock.advance(ChronoDuration::minutes(2));
    ExpiryReaper::new(ctx.repository.clone(), ctx.clock.clone(), Duration::ZERO)
        .run_once()
        .await
        .unwrap();

    let created = ctx
        .state
        .url_service
        .create_short_url("https://example.com".to_string(), None)
        .await
        .unwrap();

    assert_ne!(created.id, first.id);
}

#[tokio::test]
async fn test_create_ignores_expired_record_awaiting_purge() {
    let ctx = create_test_context();
    let expiry = test_now() + ChronoDuration::minutes(1);
    let first = insert_url(&ctx.repository, "https://example.com", Some(expiry)).await;

    ctx.clock.advance(ChronoDuration::minutes(2));

    let created = ctx
        .state
        .url_service
        .create_short_url("https://example.com".to_string(), Some(expiry))
        .await
        .unwrap();

    assert_ne!(created.id, first.id);
    assert_eq!(ctx.repository.len().await, 2);
}

#[tokio::test]
async fn test_create_reuses_record_until_it_expires() {
    let ctx = create_test_context();
    let expiry = test_now() + ChronoDuration::minutes(1);
    let first = insert_url(&ctx.repository, "https://example.com", Some(expiry)).await;

    ctx.clock.advance(ChronoDuration::seconds(59));

    let reused = ctx
        .state
        .url_service
        .create_short_url("https://example.com".to_string(), Some(expiry))
        .await
        .unwrap();

    assert_eq!(reused.id, first.id);
    assert!(ctx.state.url_service.resolve(&reused.code).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_spawned_reaper_purges_on_interval() {
    let ctx = create_test_context();
    insert_url(
        &ctx.repository,
        "https://example.com",
        Some(test_now() + ChronoDuration::seconds(30)),
    )
    .await;

    let handle = ExpiryReaper::new(
        ctx.repository.clone(),
        ctx.clock.clone(),
        Duration::from_secs(60),
    )
    .spawn();

    // First tick fires immediately; nothing has expired yet.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(ctx.repository.len().await, 1);

    ctx.clock.advance(ChronoDuration::minutes(1));
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(ctx.repository.is_empty().await);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_reaper_task() {
    let ctx = create_test_context();

    let handle = ExpiryReaper::new(
        ctx.repository.clone(),
        ctx.clock.clone(),
        Duration::from_secs(3600),
    )
    .spawn();

    assert!(!handle.is_finished());
    handle.stop().await;
}
