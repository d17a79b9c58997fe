//! Bearer token storage.
//!
//! The starter kit's entire persistence surface: one bearer token behind a
//! trait so hosts can back it with whatever storage they have.

use std::sync::RwLock;

use async_trait::async_trait;

/// Stores the current bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The current token, if any.
    async fn get(&self) -> Option<String>;

    /// Replace the stored token.
    async fn set(&self, token: &str);

    /// Remove the stored token.
    async fn clear(&self);
}

/// An in-memory token store. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Option<String> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }

    async fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    async fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}
