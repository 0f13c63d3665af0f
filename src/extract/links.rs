// src/extract/links.rs
// =============================================================================
// Finds the links a page contributes to the crawl.
//
// How it works:
// 1. Take every <a href> in the whole document (not just the content region)
// 2. Resolve each href against the page's own URL: relative paths,
//    protocol-relative "//host/x" and fragment-only "#top" all become
//    absolute URLs
// 3. Keep the ones the scope check accepts, in document order, once each
//
// Fragments and query strings are left exactly as resolved, so "page#a" and
// "page?b=2" are different URLs from "page".
// =============================================================================

use std::collections::HashSet;
use url::Url;

use super::tree::PageTree;
use crate::crawl::VisitedSet;
use crate::scope::{is_in_scope, ScopeBoundary};

/// In-scope, unvisited links of a page, in document order
pub fn discover_links<T: PageTree>(
    tree: &T,
    page_url: &Url,
    boundary: &ScopeBoundary,
    visited: &VisitedSet,
) -> Vec<Url> {
    let mut seen = HashSet::new();

    tree.anchor_hrefs()
        .into_iter()
        .filter_map(|href| resolve_link(page_url, href))
        .filter(|link| is_in_scope(link, page_url, boundary, visited))
        .filter(|link| seen.insert(link.as_str().to_string()))
        .collect()
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}
