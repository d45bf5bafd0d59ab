//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `307 Temporary Redirect` with `Location` set to the original URL. The
/// redirect is never permanent because the link may expire.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, malformed, or expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let short = state.url_service.resolve(&code).await?;

    let location = HeaderValue::from_str(&short.original_url).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "id": short.id, "reason": e.to_string() }),
        )
    })?;

    tracing::info!(code = %code, url = %short.original_url, "Redirecting");

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
