use std::sync::Arc;

use marquee_core::catalog::IdentityResolver;
use marquee_core::database::CatalogStore;
use marquee_core::database::memory::InMemoryCatalogStore;
use marquee_core::providers::{MetadataProvider, ProviderError};
use marquee_model::{MediaMetadata, MediaType, TmdbId};
use mockall::mock;
use mockall::predicate::eq;

mock! {
    Provider {}

    #[async_trait::async_trait]
    impl MetadataProvider for Provider {
        async fn fetch(
            &self,
            media_type: MediaType,
            id: TmdbId,
        ) -> Result<MediaMetadata, ProviderError>;
    }
}

fn metadata(
    id: u64,
    media_type: MediaType,
    title: &str,
    genres: &[&str],
) -> MediaMetadata {
    MediaMetadata {
        tmdb_id: TmdbId(id),
        media_type,
        title: title.to_string(),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        genres: genres.iter().map(|genre| genre.to_string()).collect(),
        release_date: None,
        seasons: Vec::new(),
    }
}

#[tokio::test]
async fn resolving_twice_fetches_upstream_exactly_once() {
    let store = Arc::new(InMemoryCatalogStore::new());
    let mut provider = MockProvider::new();
    provider
        .expect_fetch()
        .with(eq(MediaType::Movie), eq(TmdbId(603)))
        .times(1)
        .returning(|_, _| {
            Ok(metadata(603, MediaType::Movie, "The Matrix", &["Action"]))
        });

    let resolver = IdentityResolver::new(store.clone(), Arc::new(provider));

    let first = resolver.resolve(TmdbId(603), MediaType::Movie).await;
    let second = resolver.resolve(TmdbId(603), MediaType::Movie).await;

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn known_items_resolve_without_any_upstream_call() {
    let store = Arc::new(InMemoryCatalogStore::new());
    store
        .insert_item(&metadata(603, MediaType::Movie, "The Matrix", &[]))
        .await
        .unwrap();

    // No expectation registered: any fetch would fail the test.
    let provider = MockProvider::new();
    let resolver = IdentityResolver::new(store, Arc::new(provider));

    assert!(
        resolver
            .resolve(TmdbId(603), MediaType::Movie)
            .await
            .is_some()
    );
}

#[tokio::test]
async fn fetch_failure_collapses_to_none_and_persists_nothing() {
    let store = Arc::new(InMemoryCatalogStore::new());
    let mut provider = MockProvider::new();
    provider
        .expect_fetch()
        .times(1)
        .returning(|_, _| Err(ProviderError::NotFound));

    let resolver = IdentityResolver::new(store.clone(), Arc::new(provider));

    assert!(
        resolver
            .resolve(TmdbId(999_999), MediaType::Movie)
            .await
            .is_none()
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn same_external_id_with_different_types_gets_distinct_rows() {
    let store = Arc::new(InMemoryCatalogStore::new());
    let mut provider = MockProvider::new();
    provider
        .expect_fetch()
        .with(eq(MediaType::Movie), eq(TmdbId(550)))
        .times(1)
        .returning(|_, _| {
            Ok(metadata(550, MediaType::Movie, "Fight Club", &[]))
        });
    provider
        .expect_fetch()
        .with(eq(MediaType::Series), eq(TmdbId(550)))
        .times(1)
        .returning(|_, _| {
            Ok(metadata(550, MediaType::Series, "Unrelated Show", &[]))
        });

    let resolver = IdentityResolver::new(store.clone(), Arc::new(provider));

    let movie = resolver.resolve(TmdbId(550), MediaType::Movie).await;
    let series = resolver.resolve(TmdbId(550), MediaType::Series).await;

    assert!(movie.is_some());
    assert!(series.is_some());
    assert_ne!(movie, series);
    assert_eq!(store.len().await, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_first_resolutions_converge_on_one_row() {
    let store = Arc::new(InMemoryCatalogStore::new());
    let mut provider = MockProvider::new();
    // Both racers may fetch before either insert lands; the store's
    // uniqueness contract still collapses them to one row.
    provider
        .expect_fetch()
        .times(1..=2)
        .returning(|_, _| {
            Ok(metadata(603, MediaType::Movie, "The Matrix", &["Action"]))
        });

    let resolver =
        Arc::new(IdentityResolver::new(store.clone(), Arc::new(provider)));

    let left = {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move {
            resolver.resolve(TmdbId(603), MediaType::Movie).await
        })
    };
    let right = {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move {
            resolver.resolve(TmdbId(603), MediaType::Movie).await
        })
    };

    let (left, right) = (left.await.unwrap(), right.await.unwrap());

    assert!(left.is_some());
    assert_eq!(left, right);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn backfill_fills_only_items_missing_genres() {
    let store = Arc::new(InMemoryCatalogStore::new());
    store
        .insert_item(&metadata(603, MediaType::Movie, "The Matrix", &[]))
        .await
        .unwrap();
    store
        .insert_item(&metadata(
            550,
            MediaType::Movie,
            "Fight Club",
            &["Drama"],
        ))
        .await
        .unwrap();

    let mut provider = MockProvider::new();
    provider
        .expect_fetch()
        .with(eq(MediaType::Movie), eq(TmdbId(603)))
        .times(1)
        .returning(|_, _| {
            Ok(metadata(
                603,
                MediaType::Movie,
                "The Matrix",
                &["Action", "Science Fiction"],
            ))
        });

    let resolver = IdentityResolver::new(store.clone(), Arc::new(provider));

    let repaired = resolver
        .backfill_genres(MediaType::Movie)
        .await
        .unwrap();
    assert_eq!(repaired, 1);

    let item = store
        .find_item(TmdbId(603), MediaType::Movie)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.genres, vec!["Action", "Science Fiction"]);
}

#[tokio::test]
async fn backfill_skips_items_whose_refetch_fails() {
    let store = Arc::new(InMemoryCatalogStore::new());
    store
        .insert_item(&metadata(603, MediaType::Movie, "The Matrix", &[]))
        .await
        .unwrap();

    let mut provider = MockProvider::new();
    provider
        .expect_fetch()
        .times(1)
        .returning(|_, _| Err(ProviderError::RateLimited));

    let resolver = IdentityResolver::new(store.clone(), Arc::new(provider));

    let repaired = resolver
        .backfill_genres(MediaType::Movie)
        .await
        .unwrap();
    assert_eq!(repaired, 0);
}
