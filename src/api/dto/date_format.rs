//! Wire format for timestamps.
//!
//! Dates are exchanged as `yyyy-MM-dd HH:mm:ss` local time with no offset.
//! Any other shape fails deserialization, which the API reports as a JSON
//! parse error rather than a validation error.

/// `chrono` format string for `yyyy-MM-dd HH:mm:ss`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter for `Option<NaiveDateTime>`; `null` maps to `None`.
pub mod optional {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            None => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(&s, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
