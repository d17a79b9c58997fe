mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use appkit_client::cache::{AssetCache, CacheProvider, CachedAsset, InMemoryCache};
use common::spawn_server;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

#[tokio::test]
async fn test_cached_asset_ttl() {
    let fresh = CachedAsset::with_ttl(b"data".to_vec(), None, Duration::from_secs(60));
    assert!(!fresh.is_expired());

    let stale = CachedAsset::with_ttl(b"data".to_vec(), None, Duration::from_millis(1));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(stale.is_expired());

    let forever = CachedAsset::new(b"data".to_vec(), None);
    assert!(!forever.is_expired());
}

#[tokio::test]
async fn test_memory_cache_round_trip() {
    let cache = InMemoryCache::new();
    cache
        .set("a", CachedAsset::new(b"one".to_vec(), Some("text/css".into())))
        .await;

    let asset = cache.get("a").await.expect("present");
    assert_eq!(asset.body, b"one");
    assert_eq!(asset.content_type.as_deref(), Some("text/css"));

    cache.remove("a").await;
    assert!(cache.get("a").await.is_none());
}

#[tokio::test]
async fn test_memory_cache_never_returns_expired() {
    let cache = InMemoryCache::new();
    cache
        .set(
            "stale",
            CachedAsset::with_ttl(b"x".to_vec(), None, Duration::from_millis(1)),
        )
        .await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(cache.get("stale").await.is_none());
    // The expired entry was dropped on access.
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_gc_counts_removed_entries() {
    let cache = InMemoryCache::new();
    cache
        .set(
            "stale",
            CachedAsset::with_ttl(b"x".to_vec(), None, Duration::from_millis(1)),
        )
        .await;
    cache
        .set("fresh", CachedAsset::new(b"y".to_vec(), None))
        .await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(cache.gc().await, 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_clear_empties_the_cache() {
    let cache = InMemoryCache::new();
    cache.set("a", CachedAsset::new(b"x".to_vec(), None)).await;
    cache.set("b", CachedAsset::new(b"y".to_vec(), None)).await;
    cache.clear().await;
    assert!(cache.is_empty());
}

// ============================================================================
// AssetCache
// ============================================================================

fn counting_server(hits: Arc<AtomicUsize>) -> common::Handler {
    Arc::new(move |parts, _body| {
        hits.fetch_add(1, Ordering::SeqCst);
        let body = format!("asset:{}", parts.uri.path());
        Response::builder()
            .status(200)
            .header("Content-Type", "text/css")
            .body(Full::new(Bytes::from(body)))
            .expect("response")
    })
}

#[tokio::test]
async fn test_precache_then_fetch_is_cache_first() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_server(counting_server(Arc::clone(&hits))).await;
    let url = format!("http://{addr}/assets/app.css");

    let cache = AssetCache::new("appkit-v1", InMemoryCache::new());
    assert_eq!(cache.precache([url.as_str()]).await, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Served from cache: the network is not touched again.
    let outcome = cache.fetch(&url).await.expect("fetch");
    assert!(outcome.is_cached());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.asset().content_type.as_deref(), Some("text/css"));
    assert_eq!(outcome.into_body(), b"asset:/assets/app.css");
}

#[tokio::test]
async fn test_miss_goes_to_network_without_writeback() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_server(counting_server(Arc::clone(&hits))).await;
    let url = format!("http://{addr}/uncached.js");

    let cache = AssetCache::new("appkit-v1", InMemoryCache::new());

    let outcome = cache.fetch(&url).await.expect("fetch");
    assert!(!outcome.is_cached());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // A miss is not written back; fetching again hits the network again.
    let outcome = cache.fetch(&url).await.expect("fetch");
    assert!(!outcome.is_cached());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_precache_skips_failing_entries() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let addr = spawn_server(Arc::new(move |parts, _body| {
        counter.fetch_add(1, Ordering::SeqCst);
        let status: u16 = if parts.uri.path() == "/missing.css" { 404 } else { 200 };
        Response::builder()
            .status(status)
            .body(Full::new(Bytes::from("x")))
            .expect("response")
    }))
    .await;

    let cache = AssetCache::new("appkit-v1", InMemoryCache::new());
    let cached = cache
        .precache([
            format!("http://{addr}/ok.css"),
            format!("http://{addr}/missing.css"),
        ])
        .await;
    assert_eq!(cached, 1);

    let ok = cache.fetch(&format!("http://{addr}/ok.css")).await.expect("fetch");
    assert!(ok.is_cached());
}

#[tokio::test]
async fn test_manual_put_and_activate() {
    let cache = AssetCache::new("appkit-v2", InMemoryCache::new());

    cache
        .put(
            "/app.js",
            CachedAsset::with_ttl(b"old".to_vec(), None, Duration::from_millis(1)),
        )
        .await;
    cache.put("/keep.js", CachedAsset::new(b"keep".to_vec(), None)).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Activation drops expired entries.
    assert_eq!(cache.activate().await, 1);

    let outcome = cache.fetch("/keep.js").await.expect("fetch");
    assert!(outcome.is_cached());
    assert_eq!(outcome.into_body(), b"keep");
}
