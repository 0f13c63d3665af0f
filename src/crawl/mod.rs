// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Depth-first crawling from a seed URL, one page at a time
// - Stays inside the seed's scheme, host and path prefix
// - Every URL is visited at most once
// - A failing page never stops the crawl
//
// Submodules:
// - traversal: the Crawler and its explicit DFS stack
// - page: processing of a single page
// - visited: the VisitedSet
// - report: what the crawl returns
// =============================================================================

mod page;
mod report;
mod traversal;
mod visited;

// Re-export the main crawling API
pub use report::CrawlReport;
pub use traversal::Crawler;
pub use visited::VisitedSet;
