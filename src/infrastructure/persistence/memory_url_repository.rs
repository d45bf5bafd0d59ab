//! Process-local implementation of the URL repository.

use async_trait::async_trait;
use chrono::{NaiveDateTime, SubsecRound};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// In-memory repository for single-node deployments and tests.
///
/// Records live in a `BTreeMap` keyed by id, so iteration is in insertion
/// order. Ids start at 1 and are never reused, even after a purge. Contents
/// are lost when the process exits.
pub struct InMemoryUrlRepository {
    clock: Arc<dyn Clock>,
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: i64,
    records: BTreeMap<i64, UrlRecord>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository that stamps `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: RwLock::new(Inner {
                next_id: 1,
                records: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored records, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let record = UrlRecord::new(
            id,
            new_url.original_url,
            self.clock.now().trunc_subsecs(0),
            new_url.expires_at,
        );
        inner.records.insert(id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn find_by_url_and_expiry(
        &self,
        original_url: &str,
        expires_at: Option<NaiveDateTime>,
    ) -> Result<Option<UrlRecord>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .records
            .values()
            .find(|r| r.original_url == original_url && r.expires_at == expires_at)
            .cloned())
    }

    async fn delete_expired_before(&self, cutoff: NaiveDateTime) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;

        let before = inner.records.len();
        inner
            .records
            .retain(|_, r| r.expires_at.is_none_or(|expires_at| expires_at >= cutoff));

        Ok((before - inner.records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn repo() -> (InMemoryUrlRepository, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        (InMemoryUrlRepository::new(clock.clone()), clock)
    }

    fn new_url(url: &str, expires_at: Option<NaiveDateTime>) -> NewUrl {
        NewUrl {
            original_url: url.to_string(),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids() {
        let (repo, _) = repo();

        let a = repo.insert(new_url("https://a.com", None)).await.unwrap();
        let b = repo.insert(new_url("https://b.com", None)).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, start());
    }

    #[tokio::test]
    async fn test_created_at_has_second_precision() {
        let (repo, clock) = repo();
        clock.advance(Duration::milliseconds(750));

        let r = repo.insert(new_url("https://a.com", None)).await.unwrap();

        assert_eq!(r.created_at, start());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_purge() {
        let (repo, clock) = repo();
        let expiry = start() + Duration::hours(1);

        let first = repo
            .insert(new_url("https://a.com", Some(expiry)))
            .await
            .unwrap();
        clock.advance(Duration::hours(2));
        repo.delete_expired_before(clock.now()).await.unwrap();

        let second = repo.insert(new_url("https://b.com", None)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (repo, _) = repo();
        let r = repo.insert(new_url("https://a.com", None)).await.unwrap();

        assert_eq!(repo.find_by_id(r.id).await.unwrap(), Some(r));
        assert_eq!(repo.find_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_url_and_expiry_matches_exactly() {
        let (repo, _) = repo();
        let expiry = start() + Duration::days(1);

        let never = repo.insert(new_url("https://a.com", None)).await.unwrap();
        let expiring = repo
            .insert(new_url("https://a.com", Some(expiry)))
            .await
            .unwrap();

        let found = repo
            .find_by_url_and_expiry("https://a.com", None)
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(never.id));

        let found = repo
            .find_by_url_and_expiry("https://a.com", Some(expiry))
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(expiring.id));

        let found = repo
            .find_by_url_and_expiry("https://a.com", Some(expiry + Duration::seconds(1)))
            .await
            .unwrap();
        assert!(found.is_none());

        let found = repo
            .find_by_url_and_expiry("https://a.com/", None)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_expired_before_keeps_live_and_permanent() {
        let (repo, _) = repo();

        let permanent = repo.insert(new_url("https://a.com", None)).await.unwrap();
        let expired = repo
            .insert(new_url("https://b.com", Some(start() - Duration::seconds(1))))
            .await
            .unwrap();
        let at_cutoff = repo
            .insert(new_url("https://c.com", Some(start())))
            .await
            .unwrap();
        let live = repo
            .insert(new_url("https://d.com", Some(start() + Duration::weeks(1))))
            .await
            .unwrap();

        let purged = repo.delete_expired_before(start()).await.unwrap();

        assert_eq!(purged, 1);
        assert!(repo.find_by_id(expired.id).await.unwrap().is_none());
        assert!(repo.find_by_id(permanent.id).await.unwrap().is_some());
        assert!(repo.find_by_id(at_cutoff.id).await.unwrap().is_some());
        assert!(repo.find_by_id(live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_expired_before_is_idempotent() {
        let (repo, _) = repo();
        repo.insert(new_url("https://b.com", Some(start() - Duration::hours(1))))
            .await
            .unwrap();

        assert_eq!(repo.delete_expired_before(start()).await.unwrap(), 1);
        assert_eq!(repo.delete_expired_before(start()).await.unwrap(), 0);
        assert!(repo.is_empty().await);
    }
}
