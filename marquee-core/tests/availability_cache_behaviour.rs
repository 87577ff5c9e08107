use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Duration;
use marquee_core::availability::AvailabilityCache;
use marquee_core::providers::{AvailabilityProvider, ProviderError};
use marquee_model::{MediaType, TmdbId};

/// Provider double that serves a fixed id set and counts upstream calls.
struct ScriptedProvider {
    ids: HashSet<String>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl ScriptedProvider {
    fn serving(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvailabilityProvider for ScriptedProvider {
    async fn available_ids(
        &self,
        _media_type: MediaType,
    ) -> Result<HashSet<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::ApiError(
                "scripted outage".to_string(),
            ));
        }
        Ok(self.ids.clone())
    }
}

#[tokio::test]
async fn empty_cache_populates_on_first_check() {
    let provider = ScriptedProvider::serving(&["60625", "1396"]);
    let cache = AvailabilityCache::new(provider.clone());

    let verdict = cache
        .is_available(TmdbId(60625), MediaType::Series)
        .await;

    assert!(verdict.available);
    assert!(verdict.reason.is_none());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn fresh_snapshot_requires_no_further_upstream_calls() {
    let provider = ScriptedProvider::serving(&["603"]);
    let cache = AvailabilityCache::new(provider.clone());

    assert!(
        cache
            .is_available(TmdbId(603), MediaType::Movie)
            .await
            .available
    );
    for _ in 0..5 {
        let verdict =
            cache.is_available(TmdbId(550), MediaType::Movie).await;
        assert!(!verdict.available);
    }

    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn snapshots_are_kept_per_content_type() {
    let provider = ScriptedProvider::serving(&["603"]);
    let cache = AvailabilityCache::new(provider.clone());

    cache.is_available(TmdbId(603), MediaType::Movie).await;
    cache.is_available(TmdbId(603), MediaType::Series).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn expired_snapshot_triggers_exactly_one_refetch_per_check() {
    let provider = ScriptedProvider::serving(&["603"]);
    let cache =
        AvailabilityCache::with_ttl(provider.clone(), Duration::zero());

    cache.is_available(TmdbId(603), MediaType::Movie).await;
    cache.is_available(TmdbId(603), MediaType::Movie).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn failed_refresh_serves_the_stale_snapshot_unchanged() {
    let provider = ScriptedProvider::serving(&["603"]);
    let cache =
        AvailabilityCache::with_ttl(provider.clone(), Duration::zero());

    let first = cache.is_available(TmdbId(603), MediaType::Movie).await;
    assert!(first.available);

    provider.set_failing(true);

    let stale = cache.is_available(TmdbId(603), MediaType::Movie).await;
    assert!(stale.available);
    assert!(stale.reason.is_some());

    let unrelated =
        cache.is_available(TmdbId(550), MediaType::Movie).await;
    assert!(!unrelated.available);

    // Recovery: the outage never clobbered the snapshot, and the next
    // successful refresh answers cleanly again.
    provider.set_failing(false);
    let recovered =
        cache.is_available(TmdbId(603), MediaType::Movie).await;
    assert!(recovered.available);
    assert!(recovered.reason.is_none());
}

#[tokio::test]
async fn failure_with_no_snapshot_degrades_to_unavailable() {
    let provider = ScriptedProvider::serving(&["603"]);
    provider.set_failing(true);
    let cache = AvailabilityCache::new(provider.clone());

    let verdict = cache.is_available(TmdbId(603), MediaType::Movie).await;

    assert!(!verdict.available);
    assert!(verdict.reason.is_some());
    assert_eq!(provider.calls(), 1);
}
