//! Repository implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::UrlRepository`].
//! One is selected per deployment through `STORAGE_BACKEND`.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryUrlRepository`] - Process-local storage

pub mod memory_url_repository;
pub mod pg_url_repository;

pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
