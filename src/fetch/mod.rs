// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// Submodules:
// - http: the real fetcher, built on reqwest
// - error: FetchError, the transport error taxonomy
//
// The crawler only ever talks to the `Fetcher` trait, so tests can hand it
// an in-memory site instead of a network.
// =============================================================================

mod error;
mod http;

use async_trait::async_trait;

pub use error::FetchError;
pub use http::HttpFetcher;

/// Something that can GET a URL and hand back the body as text
///
/// Implementations follow redirects themselves and report any non-2xx final
/// status as `FetchError::Status`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
