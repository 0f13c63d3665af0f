// src/scope.rs
// =============================================================================
// This module decides which discovered links the crawler may follow.
//
// The boundary is taken once from the seed URL and never changes. A link is
// in scope when:
// 1. its absolute form starts with the seed URL string
// 2. its path sits under the seed's path (whole segments, so /docsx is not
//    under /docs)
// 3. its host and port equal the host and port of the page it was found on
// 4. it has not been visited yet
// =============================================================================

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::crawl::VisitedSet;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("invalid seed URL '{input}': {reason}")]
    InvalidSeed { input: String, reason: String },
}

/// Immutable snapshot of the seed's scheme, host and path prefix
#[derive(Debug, Clone)]
pub struct ScopeBoundary {
    seed: Url,
    // Serialized seed, compared as a literal prefix
    prefix: String,
}

impl ScopeBoundary {
    /// Parses and validates the seed URL
    ///
    /// The seed must be an absolute http(s) URL with a host. Its serialized
    /// form (e.g. `https://ex.com` becomes `https://ex.com/`) is what every
    /// link is compared against.
    pub fn from_seed(input: &str) -> Result<Self, ScopeError> {
        let invalid = |reason: String| ScopeError::InvalidSeed {
            input: input.to_string(),
            reason,
        };

        let seed = Url::parse(input.trim()).map_err(|e| invalid(e.to_string()))?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", seed.scheme())));
        }
        if seed.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }

        let prefix = seed.to_string();
        Ok(Self { seed, prefix })
    }

    /// The normalized seed URL, also the first URL crawled
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    pub fn path_prefix(&self) -> &str {
        self.seed.path()
    }

    /// Rules 1-3: does this link stay inside the crawl boundary?
    ///
    /// `current_page` is the page the link was found on.
    pub fn contains(&self, candidate: &Url, current_page: &Url) -> bool {
        if !candidate.as_str().starts_with(&self.prefix) {
            return false;
        }

        if !path_within(candidate.path(), self.path_prefix()) {
            return false;
        }

        candidate.host_str() == current_page.host_str()
            && candidate.port_or_known_default() == current_page.port_or_known_default()
    }
}

/// Full scope check, including the visited set (rule 4)
pub fn is_in_scope(
    candidate: &Url,
    current_page: &Url,
    boundary: &ScopeBoundary,
    visited: &VisitedSet,
) -> bool {
    if !boundary.contains(candidate, current_page) {
        debug!(link = %candidate, "out of scope");
        return false;
    }

    !visited.contains(candidate.as_str())
}

// Segment-aware containment: "/docs/api" is under "/docs", "/docsx" is not
fn path_within(path: &str, prefix: &str) -> bool {
    if prefix.ends_with('/') {
        return path.starts_with(prefix);
    }

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
