//! Cache-first asset fetching over a static manifest.

use std::sync::Arc;

use reqwest::Client;

use crate::error::ApiError;

use super::{CacheProvider, CachedAsset};

/// Whether a fetched asset came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Returned from the cache.
    Hit,
    /// Freshly fetched from the network.
    Miss,
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// A fetched asset tagged with its cache provenance.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    asset: CachedAsset,
    /// Whether the asset came from the cache.
    pub cache: CacheStatus,
}

impl FetchOutcome {
    fn hit(asset: CachedAsset) -> Self {
        Self {
            asset,
            cache: CacheStatus::Hit,
        }
    }

    fn miss(asset: CachedAsset) -> Self {
        Self {
            asset,
            cache: CacheStatus::Miss,
        }
    }

    /// Returns `true` if the asset came from the cache.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// Returns a reference to the asset.
    pub fn asset(&self) -> &CachedAsset {
        &self.asset
    }

    /// Consumes the outcome and returns the asset body.
    pub fn into_body(self) -> Vec<u8> {
        self.asset.body
    }
}

/// A named, cache-first asset cache.
///
/// A static manifest populates the cache up front
/// ([`precache`](Self::precache)), and [`fetch`](Self::fetch) consults the
/// cache before the network. A miss is served from the network without
/// being written back; the manifest is the only implicit writer.
///
/// Cheap to clone; clones share the provider.
///
/// # Example
///
/// ```ignore
/// let cache = AssetCache::new("appkit-v1", InMemoryCache::new());
/// cache.precache(&["https://example.test/app.css"]).await;
///
/// let outcome = cache.fetch("https://example.test/app.css").await?;
/// assert!(outcome.is_cached());
/// ```
#[derive(Clone)]
pub struct AssetCache {
    inner: Arc<AssetCacheInner>,
}

struct AssetCacheInner {
    name: String,
    provider: Arc<dyn CacheProvider>,
    http_client: Client,
}

impl AssetCache {
    /// Creates a named asset cache over a provider.
    pub fn new(name: impl Into<String>, provider: impl CacheProvider + 'static) -> Self {
        Self {
            inner: Arc::new(AssetCacheInner {
                name: name.into(),
                provider: Arc::new(provider),
                http_client: Client::new(),
            }),
        }
    }

    /// Creates a named asset cache with a custom HTTP client.
    pub fn with_http_client(
        name: impl Into<String>,
        provider: impl CacheProvider + 'static,
        http_client: Client,
    ) -> Self {
        Self {
            inner: Arc::new(AssetCacheInner {
                name: name.into(),
                provider: Arc::new(provider),
                http_client,
            }),
        }
    }

    /// The cache name. Version bumps use a new name plus
    /// [`clear`](Self::clear).
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    fn key(&self, url: &str) -> String {
        format!("{}:{url}", self.inner.name)
    }

    /// Fetch and store every URL of a static manifest.
    ///
    /// Entries that fail to fetch are skipped; the rest are cached without
    /// expiry. Returns the number of assets cached.
    pub async fn precache<I, S>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cached = 0;
        for url in urls {
            let url = url.as_ref();
            match self.fetch_network(url).await {
                Ok(asset) => {
                    self.inner.provider.set(&self.key(url), asset).await;
                    cached += 1;
                }
                Err(_) => continue,
            }
        }
        cached
    }

    /// Cache-first fetch: the cached asset when present, otherwise the
    /// network. A network-served miss is not written back to the cache.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, ApiError> {
        if let Some(asset) = self.inner.provider.get(&self.key(url)).await {
            return Ok(FetchOutcome::hit(asset));
        }
        let asset = self.fetch_network(url).await?;
        Ok(FetchOutcome::miss(asset))
    }

    /// Store an asset directly under a URL.
    pub async fn put(&self, url: &str, asset: CachedAsset) {
        self.inner.provider.set(&self.key(url), asset).await;
    }

    /// Remove a cached asset.
    pub async fn remove(&self, url: &str) {
        self.inner.provider.remove(&self.key(url)).await;
    }

    /// Drop expired entries. Returns the number removed.
    pub async fn activate(&self) -> usize {
        self.inner.provider.gc().await
    }

    /// Clear the entire backing provider.
    pub async fn clear(&self) {
        self.inner.provider.clear().await;
    }

    async fn fetch_network(&self, url: &str) -> Result<CachedAsset, ApiError> {
        let response = self
            .inner
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Fetch failed"),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(ApiError::Network)?.to_vec();

        Ok(CachedAsset::new(body, content_type))
    }
}
