use chrono::{DateTime, Utc};

use crate::ids::{CatalogId, TmdbId};
use crate::media_type::MediaType;

/// One playable title as persisted in the local catalog.
///
/// Created on first resolution of an external identifier, updated by the
/// genre repair pass, never deleted by the core. For a given
/// (`tmdb_id`, `media_type`) pair at most one row exists; the storage layer
/// enforces that uniqueness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogItem {
    pub id: CatalogId,
    pub tmdb_id: TmdbId,
    pub media_type: MediaType,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Genre labels captured from provider metadata at sync time.
    /// Empty until the first sync that carried genres, or until a repair
    /// pass backfills them.
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    pub fn needs_genre_backfill(&self) -> bool {
        self.genres.is_empty()
    }
}

/// Season outline carried for series metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonOutline {
    pub season_number: u32,
    pub name: Option<String>,
    pub episode_count: u32,
}

/// Full metadata record fetched from the external provider for one title.
///
/// This is the provider-side shape a sync derives a [`CatalogItem`] from;
/// `seasons` is populated for series only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaMetadata {
    pub tmdb_id: TmdbId,
    pub media_type: MediaType,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<String>,
    pub release_date: Option<chrono::NaiveDate>,
    pub seasons: Vec<SeasonOutline>,
}
