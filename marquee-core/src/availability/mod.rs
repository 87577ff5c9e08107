//! Freshness-bounded cache of externally-playable identifiers.
//!
//! Holds one wholesale snapshot per content type in process memory and
//! refreshes it from the playback provider when older than the TTL. Lost on
//! restart, which is an accepted staleness reset.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use marquee_model::{MediaType, TmdbId};
use tracing::{debug, warn};

use crate::providers::AvailabilityProvider;

/// Default snapshot TTL. A snapshot older than this is refreshed on access.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// One complete snapshot of playable identifiers for a content type.
///
/// `available` is always a wholesale capture; refreshes replace the whole
/// set rather than merging into it.
#[derive(Debug, Clone)]
struct AvailabilitySnapshot {
    captured_at: DateTime<Utc>,
    available: Arc<HashSet<String>>,
}

/// Playability verdict for one external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub reason: Option<String>,
}

impl Availability {
    fn verdict(available: bool) -> Self {
        Self {
            available,
            reason: None,
        }
    }
}

/// Process-wide availability cache.
///
/// Construct one instance and share it; tests construct isolated instances
/// with their own providers and TTLs. Concurrent callers hitting an expired
/// snapshot may each trigger a refresh fetch - there is no single-flight
/// deduplication. Each fetch is idempotent and wholesale, so duplicates
/// converge on equivalent snapshots.
pub struct AvailabilityCache {
    provider: Arc<dyn AvailabilityProvider>,
    snapshots: DashMap<MediaType, AvailabilitySnapshot>,
    ttl: Duration,
}

impl fmt::Debug for AvailabilityCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityCache")
            .field("ttl", &self.ttl)
            .field("snapshots", &self.snapshots.len())
            .finish()
    }
}

impl AvailabilityCache {
    pub fn new(provider: Arc<dyn AvailabilityProvider>) -> Self {
        Self::with_ttl(provider, Duration::minutes(DEFAULT_TTL_MINUTES))
    }

    pub fn with_ttl(
        provider: Arc<dyn AvailabilityProvider>,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            snapshots: DashMap::new(),
            ttl,
        }
    }

    /// Decide whether `id` is currently playable on the external provider.
    ///
    /// Never returns an error: upstream failures degrade to a stale verdict
    /// when a snapshot exists, or to "unavailable" with a diagnostic reason
    /// when none was ever captured.
    pub async fn is_available(
        &self,
        id: TmdbId,
        media_type: MediaType,
    ) -> Availability {
        let key = id.to_string();

        if let Some(available) = self.fresh_ids(media_type) {
            debug!(%media_type, %id, "availability cache HIT");
            return Availability::verdict(available.contains(&key));
        }

        debug!(%media_type, %id, "availability cache MISS, refreshing");

        match self.provider.available_ids(media_type).await {
            Ok(ids) => {
                let snapshot = AvailabilitySnapshot {
                    captured_at: Utc::now(),
                    available: Arc::new(ids),
                };
                let verdict = snapshot.available.contains(&key);
                // Readers observe either the old Arc or the new one, never
                // a partially written set.
                self.snapshots.insert(media_type, snapshot);
                Availability::verdict(verdict)
            }
            Err(err) => {
                warn!(%media_type, error = %err, "availability refresh failed");
                match self.snapshots.get(&media_type) {
                    Some(stale) => Availability {
                        available: stale.available.contains(&key),
                        reason: Some(format!(
                            "serving snapshot from {}: {err}",
                            stale.captured_at
                        )),
                    },
                    None => Availability {
                        available: false,
                        reason: Some(format!(
                            "availability list unavailable: {err}"
                        )),
                    },
                }
            }
        }
    }

    fn fresh_ids(
        &self,
        media_type: MediaType,
    ) -> Option<Arc<HashSet<String>>> {
        let entry = self.snapshots.get(&media_type)?;
        if Utc::now() - entry.captured_at < self.ttl {
            Some(Arc::clone(&entry.available))
        } else {
            None
        }
    }
}
