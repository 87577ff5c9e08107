//! In-memory store implementations for tests.
//!
//! Both honor the same contracts as the Postgres implementations: the
//! catalog store drops duplicate inserts on the (tmdb_id, media_type) key,
//! and the preference store increments under a single lock so concurrent
//! calls never lose updates.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use marquee_model::{
    CatalogId, CatalogItem, MediaMetadata, MediaType, ProfileId, TmdbId,
};
use tokio::sync::RwLock;

use crate::database::ports::{CatalogStore, PreferenceStore};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<HashMap<(u64, MediaType), CatalogItem>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_item(
        &self,
        tmdb_id: TmdbId,
        media_type: MediaType,
    ) -> Result<Option<CatalogItem>> {
        let items = self.items.read().await;
        Ok(items.get(&(tmdb_id.as_u64(), media_type)).cloned())
    }

    async fn insert_item(&self, metadata: &MediaMetadata) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (metadata.tmdb_id.as_u64(), metadata.media_type);
        // Uniqueness constraint: the first writer wins, later duplicates
        // are dropped silently.
        items.entry(key).or_insert_with(|| {
            let now = Utc::now();
            CatalogItem {
                id: CatalogId::new(),
                tmdb_id: metadata.tmdb_id,
                media_type: metadata.media_type,
                title: metadata.title.clone(),
                overview: metadata.overview.clone(),
                poster_path: metadata.poster_path.clone(),
                backdrop_path: metadata.backdrop_path.clone(),
                genres: metadata.genres.clone(),
                created_at: now,
                updated_at: now,
            }
        });
        Ok(())
    }

    async fn items_missing_genres(
        &self,
        media_type: MediaType,
    ) -> Result<Vec<CatalogItem>> {
        let items = self.items.read().await;
        let mut missing: Vec<CatalogItem> = items
            .values()
            .filter(|item| {
                item.media_type == media_type && item.genres.is_empty()
            })
            .cloned()
            .collect();
        missing.sort_by_key(|item| item.created_at);
        Ok(missing)
    }

    async fn update_genres(
        &self,
        id: &CatalogId,
        genres: &[String],
    ) -> Result<()> {
        let mut items = self.items.write().await;
        if let Some(item) =
            items.values_mut().find(|item| item.id == *id)
        {
            item.genres = genres.to_vec();
            item.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    scores: RwLock<HashMap<ProfileId, HashMap<String, i64>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn increment_genres(
        &self,
        profile_id: &ProfileId,
        genres: &[String],
    ) -> Result<()> {
        let mut scores = self.scores.write().await;
        let profile = scores.entry(*profile_id).or_default();
        for genre in genres {
            *profile.entry(genre.clone()).or_insert(0) += 1;
        }
        Ok(())
    }

    async fn genre_scores(
        &self,
        profile_id: &ProfileId,
    ) -> Result<HashMap<String, i64>> {
        let scores = self.scores.read().await;
        Ok(scores.get(profile_id).cloned().unwrap_or_default())
    }
}
