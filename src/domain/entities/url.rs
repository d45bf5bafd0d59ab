//! URL record entity and its derived views.

use chrono::NaiveDateTime;

use crate::utils::base62::{self, CodecError};

/// A persisted short URL mapping.
///
/// `id` and `created_at` are assigned by the store on insertion and never
/// change. `expires_at: None` means the record never expires. Timestamps are
/// local wall time at second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        created_at: NaiveDateTime,
        expires_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            original_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the record is resolvable at `now`.
    ///
    /// A record is live iff it has no expiry or its expiry is strictly after
    /// `now`. The same predicate decides what the expiry reaper may delete.
    pub fn is_live_at(&self, now: NaiveDateTime) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    /// Derives the short code for this record from its id.
    pub fn short_code(&self) -> Result<String, CodecError> {
        base62::encode(self.id)
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub original_url: String,
    pub expires_at: Option<NaiveDateTime>,
}

/// A record together with its derived short code.
///
/// Returned by the shortening service for both create and resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}

impl TryFrom<UrlRecord> for ShortUrl {
    type Error = CodecError;

    fn try_from(record: UrlRecord) -> Result<Self, Self::Error> {
        let code = record.short_code()?;
        Ok(Self {
            id: record.id,
            code,
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
        })
    }
}
