//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Timestamps cross the wire as local
//! `yyyy-MM-dd HH:mm:ss` strings (see [`date_format`]).

pub mod date_format;
pub mod health;
pub mod url;
