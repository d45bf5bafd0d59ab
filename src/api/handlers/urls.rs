//! Handlers for the short URL REST endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::url::{CreateUrlRequest, UrlResponse};
use crate::domain::clock::Clock;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for an identical request.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "expiringAt": "2026-12-31 23:59:59"
/// }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "longUrl": "https://example.com/page",
///   "shortUrl": "/j2Jp",
///   "expiringAt": "2026-12-31 23:59:59"
/// }
/// ```
///
/// # Errors
///
/// - 400 `"JSON Parse error."` if the body or a date cannot be parsed
/// - 400 `"Validation error."` with per-field details for a blank, oversized
///   or malformed URL, or an expiry that is not in the future
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate_at(state.clock.now())?;

    let short = state
        .url_service
        .create_short_url(payload.url, payload.expiring_at)
        .await?;

    Ok((StatusCode::CREATED, Json(short.into())))
}

/// Looks up a short URL by its code.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, malformed, or expired.
pub async fn get_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>, AppError> {
    let short = state.url_service.resolve(&code).await?;
    Ok(Json(short.into()))
}
