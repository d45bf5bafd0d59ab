#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use shorturl::api;
use shorturl::api::handlers::{health_handler, redirect_handler};
use shorturl::domain::clock::ManualClock;
use shorturl::domain::entities::{NewUrl, UrlRecord};
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::InMemoryUrlRepository;
use shorturl::state::AppState;

/// Fixed starting point for the test clock.
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(15, 9, 26)
        .unwrap()
}

/// State over an in-memory store, with handles to the store and the clock.
pub struct TestContext {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub repository: Arc<InMemoryUrlRepository>,
}

pub fn create_test_context() -> TestContext {
    let clock = Arc::new(ManualClock::new(test_now()));
    let repository = Arc::new(InMemoryUrlRepository::new(clock.clone()));
    let state = AppState::new(repository.clone(), clock.clone());

    TestContext {
        state,
        clock,
        repository,
    }
}

/// Router with every public route, without middleware.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(create_test_app(state)).unwrap()
}

pub async fn insert_url(
    repository: &InMemoryUrlRepository,
    url: &str,
    expires_at: Option<NaiveDateTime>,
) -> UrlRecord {
    repository
        .insert(NewUrl {
            original_url: url.to_string(),
            expires_at,
        })
        .await
        .unwrap()
}

pub fn format_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
