//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A persisted URL mapping
//! - [`NewUrl`] - Input for inserting a record
//! - [`ShortUrl`] - A record with its derived short code

pub mod url;

pub use url::{NewUrl, ShortUrl, UrlRecord};
