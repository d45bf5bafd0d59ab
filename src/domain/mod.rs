//! Domain layer containing business entities and logic.
//!
//! This module defines entities, the storage contract, the clock capability
//! and the background expiry task, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable current-time source
//! - [`expiry_reaper`] - Periodic purge of expired records
//!
//! # Expiry Lifecycle
//!
//! 1. A record is live while its expiry is absent or in the future
//! 2. Once the expiry passes, resolution treats it as not found
//! 3. [`expiry_reaper::ExpiryReaper`] later deletes it from storage

pub mod clock;
pub mod entities;
pub mod expiry_reaper;
pub mod repositories;
