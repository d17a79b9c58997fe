//! Authenticated HTTP client and asset cache for the application starter
//! kit.
//!
//! A thin wrapper over `reqwest` that injects a stored bearer token,
//! normalizes error shapes, and clears credentials on 401; plus a
//! cache-first asset cache populated from a static manifest.

pub mod cache;
pub mod endpoints;
pub mod error;
pub mod token;

mod client;

pub use client::*;
pub use error::ApiError;
pub use token::{MemoryTokenStore, TokenStore};
