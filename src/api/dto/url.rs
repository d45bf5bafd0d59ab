//! DTOs for the short URL endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::date_format;
use crate::domain::entities::ShortUrl;

/// Request to shorten a URL.
///
/// ```json
/// { "url": "https://example.com/page", "expiringAt": "2026-12-31 23:59:59" }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// The original URL; a missing field is treated as blank.
    #[serde(default)]
    #[validate(
        length(min = 3, max = 255, message = "URL length must be between 3 and 255 characters"),
        url(message = "Invalid URL format")
    )]
    pub url: String,

    /// Optional expiry; `null` or absent means the link never expires.
    #[serde(default, with = "date_format::optional")]
    pub expiring_at: Option<NaiveDateTime>,
}

impl CreateUrlRequest {
    /// Runs field validation plus the "expiry in the future" rule against `now`.
    ///
    /// # Errors
    ///
    /// Returns every failed rule keyed by wire field name (`url`, `expiringAt`).
    pub fn validate_at(&self, now: NaiveDateTime) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(expiring_at) = self.expiring_at
            && expiring_at <= now
        {
            errors.add(
                "expiringAt",
                ValidationError::new("future")
                    .with_message("Expiration date must be in the future".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Short URL representation returned by create and lookup.
///
/// ```json
/// {
///   "longUrl": "https://example.com/page",
///   "shortUrl": "/j2Jp",
///   "expiringAt": null
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub long_url: String,
    pub short_url: String,
    #[serde(with = "date_format::optional")]
    pub expiring_at: Option<NaiveDateTime>,
}

impl From<ShortUrl> for UrlResponse {
    fn from(short: ShortUrl) -> Self {
        Self {
            long_url: short.original_url,
            short_url: format!("/{}", short.code),
            expiring_at: short.expires_at,
        }
    }
}
