use std::fmt;
use std::sync::Arc;

use marquee_model::{CatalogId, MediaType, TmdbId};
use tracing::{debug, error, info, warn};

use crate::database::CatalogStore;
use crate::error::{CatalogError, Result};
use crate::providers::MetadataProvider;

/// Lazily maps an external identifier to its stable local identifier,
/// synchronizing metadata on first access.
///
/// The resolver takes no locks of its own. Two concurrent first-time
/// resolutions of the same identifier may both fetch and both attempt to
/// persist; the storage layer's uniqueness constraint drops the loser and
/// the post-insert re-query returns whichever row won.
pub struct IdentityResolver {
    store: Arc<dyn CatalogStore>,
    provider: Arc<dyn MetadataProvider>,
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver").finish()
    }
}

impl IdentityResolver {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        provider: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self { store, provider }
    }

    /// Resolve an external identifier to the local catalog identifier.
    ///
    /// The fast path is a single store lookup with no upstream call. On a
    /// miss the provider record is fetched and persisted first. Fetch and
    /// persistence failures both collapse to `None` with the underlying
    /// cause logged; retrying is the caller's decision.
    pub async fn resolve(
        &self,
        tmdb_id: TmdbId,
        media_type: MediaType,
    ) -> Option<CatalogId> {
        match self.try_resolve(tmdb_id, media_type).await {
            Ok(id) => Some(id),
            Err(err) => {
                error!(%tmdb_id, %media_type, error = %err, "resolution failed");
                None
            }
        }
    }

    async fn try_resolve(
        &self,
        tmdb_id: TmdbId,
        media_type: MediaType,
    ) -> Result<CatalogId> {
        if let Some(existing) =
            self.store.find_item(tmdb_id, media_type).await?
        {
            return Ok(existing.id);
        }

        debug!(%tmdb_id, %media_type, "catalog miss, synchronizing metadata");
        let metadata = self.provider.fetch(media_type, tmdb_id).await?;
        self.store.insert_item(&metadata).await?;

        // Re-read instead of trusting our own insert: a concurrent first
        // resolution may have won the uniqueness constraint.
        let item = self
            .store
            .find_item(tmdb_id, media_type)
            .await?
            .ok_or_else(|| {
                CatalogError::Storage(format!(
                    "catalog item missing after insert: {media_type} {tmdb_id}"
                ))
            })?;

        Ok(item.id)
    }

    /// Repair pass: re-fetch metadata for items persisted without genre
    /// labels and fill them in. Per-item fetch failures are logged and
    /// skipped rather than failing the pass. Returns the number repaired.
    pub async fn backfill_genres(
        &self,
        media_type: MediaType,
    ) -> Result<usize> {
        let pending = self.store.items_missing_genres(media_type).await?;
        let mut repaired = 0usize;

        for item in pending {
            let metadata = match self
                .provider
                .fetch(media_type, item.tmdb_id)
                .await
            {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(
                        tmdb_id = %item.tmdb_id,
                        %media_type,
                        error = %err,
                        "genre backfill fetch failed, skipping item"
                    );
                    continue;
                }
            };

            if metadata.genres.is_empty() {
                continue;
            }

            self.store.update_genres(&item.id, &metadata.genres).await?;
            repaired += 1;
        }

        if repaired > 0 {
            info!(%media_type, repaired, "backfilled genre labels");
        }

        Ok(repaired)
    }
}
