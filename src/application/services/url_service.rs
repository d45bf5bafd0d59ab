//! Short URL creation and resolution service.

use std::sync::Arc;

use chrono::{NaiveDateTime, SubsecRound};
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::base62;

/// Service for creating and resolving short URLs.
///
/// Inputs are expected to be validated already: the URL is well-formed and
/// within length bounds, and any expiry lies in the future.
pub struct UrlService<R: UrlRepository + ?Sized> {
    url_repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(url_repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            url_repository,
            clock,
        }
    }

    /// Creates a short URL, reusing an existing record when possible.
    ///
    /// # Deduplication
    ///
    /// A record is reused when its original URL is identical, its expiry is
    /// identical at second precision (two absent expiries match) and it is
    /// still live. The reused record is returned untouched. Otherwise a new
    /// record is inserted, even if an expired match awaits purging.
    ///
    /// The lookup and the insert are separate store calls, so two concurrent
    /// requests for the same pair may both insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_short_url(
        &self,
        original_url: String,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<ShortUrl, AppError> {
        let expires_at = expires_at.map(|t| t.trunc_subsecs(0));

        if let Some(existing) = self
            .url_repository
            .find_by_url_and_expiry(&original_url, expires_at)
            .await?
        {
            if existing.is_live_at(self.clock.now()) {
                debug!(id = existing.id, "Reusing existing short URL");
                metrics::counter!("urls_reused_total").increment(1);
                return Ok(ShortUrl::try_from(existing)?);
            }
            debug!(id = existing.id, "Matching short URL has expired, inserting a new one");
        }

        let record = self
            .url_repository
            .insert(NewUrl {
                original_url,
                expires_at,
            })
            .await?;

        debug!(id = record.id, "Created short URL");
        metrics::counter!("urls_created_total").increment(1);

        Ok(ShortUrl::try_from(record)?)
    }

    /// Resolves a short code to a live record.
    ///
    /// Liveness is evaluated against the clock after the lookup returns. No
    /// record is modified or deleted here, even if it has expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed, no record has
    /// the decoded id, or the record has expired. The three cases are
    /// indistinguishable to the caller.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<ShortUrl, AppError> {
        let not_found = || AppError::not_found(format!("Short URL not found: {code}"));

        let id = base62::decode(code).map_err(|e| {
            debug!(error = %e, "Short code failed to decode");
            not_found()
        })?;

        let record = self
            .url_repository
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        if !record.is_live_at(self.clock.now()) {
            debug!(id = record.id, "Short URL has expired");
            return Err(not_found());
        }

        Ok(ShortUrl::try_from(record)?)
    }

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    pub async fn store_health(&self) -> Result<(), AppError> {
        self.url_repository.ping().await
    }
}
