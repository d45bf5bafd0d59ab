//! Repository trait for short URL record storage.

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Storage contract consumed by the shortening service and the expiry reaper.
///
/// The store owns id assignment and the `created_at` timestamp. It is the only
/// shared mutable resource in the system and is responsible for its own
/// synchronization.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with its assigned id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError>;

    /// Finds a record by its id.
    ///
    /// Expired records that have not been purged yet are still returned;
    /// liveness is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record with exactly this original URL and exactly this expiry.
    ///
    /// `None` matches only records without an expiry. When several records
    /// match, the one with the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_url_and_expiry(
        &self,
        original_url: &str,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Deletes every record whose expiry is strictly before `cutoff`.
    ///
    /// Records without an expiry are never deleted. Returns the number of
    /// deleted records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_expired_before(&self, cutoff: NaiveDateTime) -> Result<u64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
