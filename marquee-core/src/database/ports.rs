use std::collections::HashMap;

use async_trait::async_trait;
use marquee_model::{
    CatalogId, CatalogItem, MediaMetadata, MediaType, ProfileId, TmdbId,
};

use crate::error::Result;

/// Persistence contract for catalog items.
///
/// The identity resolver and the genre repair pass are the only writers.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Zero or one row per (external id, content type).
    async fn find_item(
        &self,
        tmdb_id: TmdbId,
        media_type: MediaType,
    ) -> Result<Option<CatalogItem>>;

    /// Persist a new item derived from provider metadata.
    ///
    /// Implementations must deduplicate on the (tmdb_id, media_type)
    /// uniqueness constraint: a concurrent duplicate insert is dropped,
    /// never doubled. Callers re-query afterwards to learn which row won.
    async fn insert_item(&self, metadata: &MediaMetadata) -> Result<()>;

    /// Items persisted without genre labels, for the repair pass.
    async fn items_missing_genres(
        &self,
        media_type: MediaType,
    ) -> Result<Vec<CatalogItem>>;

    async fn update_genres(
        &self,
        id: &CatalogId,
        genres: &[String],
    ) -> Result<()>;
}

/// Persistence contract for per-profile genre scores.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Add one to each listed genre's score for the profile in a single
    /// all-or-nothing round trip. Implementations must increment
    /// server-side; a read-modify-write would lose updates under
    /// concurrent interactions from the same profile.
    async fn increment_genres(
        &self,
        profile_id: &ProfileId,
        genres: &[String],
    ) -> Result<()>;

    /// Score map for the profile. No rows reads back as an empty map.
    async fn genre_scores(
        &self,
        profile_id: &ProfileId,
    ) -> Result<HashMap<String, i64>>;
}
