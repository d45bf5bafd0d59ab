//! API route configuration.

use crate::api::handlers::{create_url_handler, get_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Versioned REST routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /v1/urls`        - Create (or reuse) a short URL
/// - `GET  /v1/urls/{code}` - Look up a live short URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/urls", post(create_url_handler))
        .route("/v1/urls/{code}", get(get_url_handler))
}
