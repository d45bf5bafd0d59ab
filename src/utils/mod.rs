//! Utility functions shared across the application.
//!
//! - [`base62`] - Reversible id <-> short code codec

pub mod base62;
