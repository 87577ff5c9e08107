//! Storage ports and their implementations.
//!
//! The core enforces no locking of its own; the uniqueness constraint on
//! `(tmdb_id, media_type)` and the atomic increment primitive live in the
//! storage layer, shipped by the embedded migrations.

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod ports;
pub mod postgres;

pub use ports::{CatalogStore, PreferenceStore};
pub use postgres::{PostgresCatalogStore, PostgresPreferenceStore};
