//! Asset caching layer
//!
//! Provides a `CacheProvider` trait and implementations for caching fetched
//! assets, optionally with TTL. Used by the [`AssetCache`] shim for
//! cache-first fetches against a static manifest.

mod assets;
mod memory;

pub use assets::*;
pub use memory::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A cached asset with metadata about when it was cached and when (if
/// ever) it expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAsset {
    /// The asset body.
    pub body: Vec<u8>,
    /// The `Content-Type` the asset was served with, if known.
    pub content_type: Option<String>,
    /// When this asset was cached.
    pub created_at: DateTime<Utc>,
    /// When this asset expires. `None` means it never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedAsset {
    /// Creates a non-expiring cached asset.
    pub fn new(body: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            body,
            content_type,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Creates a cached asset with a TTL from now.
    pub fn with_ttl(body: Vec<u8>, content_type: Option<String>, ttl: std::time::Duration) -> Self {
        let now = Utc::now();
        let expires_at =
            now + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::zero());
        Self {
            body,
            content_type,
            created_at: now,
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if this cached asset has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() >= expires_at)
    }
}

/// Trait for cache providers.
///
/// Implementations store and retrieve cached assets by string keys and are
/// responsible for never returning expired values from `get()`.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Retrieves a cached asset by key.
    ///
    /// Returns `None` if the key doesn't exist or the value has expired.
    async fn get(&self, key: &str) -> Option<CachedAsset>;

    /// Stores an asset in the cache.
    async fn set(&self, key: &str, asset: CachedAsset);

    /// Removes an asset from the cache.
    async fn remove(&self, key: &str);

    /// Clears all assets from the cache.
    async fn clear(&self);

    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    async fn gc(&self) -> usize;
}
