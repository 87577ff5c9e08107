use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_model::{
    CatalogId, CatalogItem, MediaMetadata, MediaType, ProfileId, TmdbId,
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::ports::{CatalogStore, PreferenceStore};
use crate::error::{CatalogError, Result};

#[derive(Debug, sqlx::FromRow)]
struct CatalogItemRow {
    id: Uuid,
    tmdb_id: i64,
    media_type: i16,
    title: String,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    genres: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CatalogItemRow> for CatalogItem {
    type Error = CatalogError;

    fn try_from(row: CatalogItemRow) -> Result<Self> {
        let media_type =
            MediaType::try_from(row.media_type).map_err(|e| {
                CatalogError::Storage(format!(
                    "corrupt catalog row {}: {e}",
                    row.id
                ))
            })?;

        Ok(CatalogItem {
            id: CatalogId(row.id),
            tmdb_id: TmdbId(row.tmdb_id as u64),
            media_type,
            title: row.title,
            overview: row.overview,
            poster_path: row.poster_path,
            backdrop_path: row.backdrop_path,
            genres: row.genres,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const CATALOG_ITEM_COLUMNS: &str = "id, tmdb_id, media_type, title, \
     overview, poster_path, backdrop_path, genres, created_at, updated_at";

/// PostgreSQL-backed implementation of the catalog item store.
#[derive(Clone, Debug)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn find_item(
        &self,
        tmdb_id: TmdbId,
        media_type: MediaType,
    ) -> Result<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "SELECT {CATALOG_ITEM_COLUMNS}
             FROM catalog_items
             WHERE tmdb_id = $1 AND media_type = $2"
        ))
        .bind(tmdb_id.as_u64() as i64)
        .bind(media_type.as_i16())
        .fetch_optional(self.pool())
        .await?;

        row.map(CatalogItem::try_from).transpose()
    }

    async fn insert_item(&self, metadata: &MediaMetadata) -> Result<()> {
        sqlx::query(
            "INSERT INTO catalog_items
                 (id, tmdb_id, media_type, title, overview, poster_path,
                  backdrop_path, genres)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (tmdb_id, media_type) DO NOTHING",
        )
        .bind(CatalogId::new().to_uuid())
        .bind(metadata.tmdb_id.as_u64() as i64)
        .bind(metadata.media_type.as_i16())
        .bind(&metadata.title)
        .bind(&metadata.overview)
        .bind(&metadata.poster_path)
        .bind(&metadata.backdrop_path)
        .bind(&metadata.genres)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn items_missing_genres(
        &self,
        media_type: MediaType,
    ) -> Result<Vec<CatalogItem>> {
        let rows = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "SELECT {CATALOG_ITEM_COLUMNS}
             FROM catalog_items
             WHERE media_type = $1 AND cardinality(genres) = 0
             ORDER BY created_at"
        ))
        .bind(media_type.as_i16())
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(CatalogItem::try_from).collect()
    }

    async fn update_genres(
        &self,
        id: &CatalogId,
        genres: &[String],
    ) -> Result<()> {
        sqlx::query(
            "UPDATE catalog_items
             SET genres = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.to_uuid())
        .bind(genres.to_vec())
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// PostgreSQL-backed implementation of the preference store.
///
/// The increment is one upsert statement, so concurrent interactions from
/// the same profile never lose updates.
#[derive(Clone, Debug)]
pub struct PostgresPreferenceStore {
    pool: PgPool,
}

impl PostgresPreferenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PreferenceStore for PostgresPreferenceStore {
    async fn increment_genres(
        &self,
        profile_id: &ProfileId,
        genres: &[String],
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO genre_preferences (profile_id, genre, score)
             SELECT $1, genre, 1 FROM unnest($2::text[]) AS genre
             ON CONFLICT (profile_id, genre)
             DO UPDATE SET score = genre_preferences.score + 1,
                           updated_at = NOW()",
        )
        .bind(profile_id.to_uuid())
        .bind(genres.to_vec())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn genre_scores(
        &self,
        profile_id: &ProfileId,
    ) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT genre, score FROM genre_preferences
             WHERE profile_id = $1",
        )
        .bind(profile_id.to_uuid())
        .fetch_all(self.pool())
        .await?;

        let mut scores = HashMap::with_capacity(rows.len());
        for row in rows {
            scores.insert(row.try_get("genre")?, row.try_get("score")?);
        }

        Ok(scores)
    }
}
