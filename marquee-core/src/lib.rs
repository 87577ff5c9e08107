//! # Marquee Core
//!
//! Core library for the Marquee streaming catalog: lazy identity
//! resolution against the external metadata provider, a freshness-bounded
//! cache of externally-playable titles, deterministic catalog orderings,
//! and per-profile genre preference tracking.
//!
//! ## Overview
//!
//! `marquee-core` is a library layer consumed in-process by page and view
//! code; it exposes no network protocol of its own. The four subsystems:
//!
//! - [`catalog`]: maps external identifiers to stable local identifiers,
//!   synchronizing metadata on first access
//! - [`availability`]: TTL-bounded snapshot of which titles the playback
//!   provider can actually serve
//! - [`ordering`]: time-windowed seeded shuffles and insertion-stable
//!   hashed sorts for rotating catalog presentation
//! - [`preferences`]: atomic per-profile genre interest scores
//!
//! Storage is reached through the narrow ports in [`database`]; upstream
//! services through the clients in [`providers`].
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Freshness-bounded availability cache
pub mod availability;

/// Catalog identity resolution
pub mod catalog;

/// Environment-driven configuration
pub mod config;

/// Storage ports and implementations
pub mod database;

/// Error taxonomy shared across the core
pub mod error;

/// Deterministic ordering engine
pub mod ordering;

/// Genre preference tracking
pub mod preferences;

/// External metadata and playback provider clients
pub mod providers;

pub use error::{CatalogError, Result};

/// Embedded migrations shipping the catalog schema, including the
/// uniqueness constraint and increment primitive the core relies on.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Curated re-exports for downstream consumers.
pub mod prelude {
    pub use crate::availability::{Availability, AvailabilityCache};
    pub use crate::catalog::IdentityResolver;
    pub use crate::config::Config;
    pub use crate::error::{CatalogError, Result};
    pub use crate::ordering::{
        hashed_stable_sort, seeded_shuffle, window_seed,
    };
    pub use crate::preferences::PreferenceTracker;
    pub use crate::providers::{
        AvailabilityProvider, HttpAvailabilityProvider, MetadataProvider,
        ProviderError, TmdbMetadataProvider,
    };
    pub use marquee_model::{
        CatalogId, CatalogItem, GenrePreferences, MediaMetadata, MediaType,
        ProfileId, TmdbId,
    };
}
