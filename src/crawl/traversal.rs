// src/crawl/traversal.rs
// =============================================================================
// This module drives the crawl, depth-first, one page at a time.
//
// How it works:
// 1. Push the seed URL onto a stack
// 2. Pop a URL; skip it if it was already visited, otherwise mark it visited
//    (before fetching, so cycles can't re-enter it)
// 3. Process the page: fetch, save, collect in-scope links
// 4. Push the links in reverse, so the first link in the page is popped next
// 5. Repeat until the stack is empty
//
// Popping the first child next means a page's whole subtree is finished
// before its next sibling starts, which is the same order plain recursion
// gives, without the recursion depth.
//
// Rust concepts:
// - Vec as a stack: push() / pop() work on the end
// - Generics with trait bounds: the crawler works with any Fetcher/PageStore
// =============================================================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use url::Url;

use super::page::process_page;
use super::report::{CrawlReport, PageOutcome};
use super::visited::VisitedSet;
use crate::fetch::Fetcher;
use crate::save::PageStore;
use crate::scope::ScopeBoundary;

/// State owned by one crawl, start to finish
struct CrawlContext {
    boundary: ScopeBoundary,
    visited: VisitedSet,
    // Save path -> URL that last wrote it, to spot collisions
    written: HashMap<PathBuf, String>,
}

/// Crawls one site section with the given fetcher and store
pub struct Crawler<F, S> {
    fetcher: F,
    store: S,
}

impl<F: Fetcher, S: PageStore> Crawler<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        Self { fetcher, store }
    }

    /// Crawls everything reachable from `seed` inside its scope
    ///
    /// Never fails as a whole. A seed that isn't a usable URL is reported
    /// like any other page that could not be fetched; pages that fail to
    /// fetch or save are logged, recorded in the report and skipped.
    pub async fn crawl(&self, seed: &str) -> CrawlReport {
        // Capture the boundary once; every discovered link is tested against it
        let boundary = match ScopeBoundary::from_seed(seed) {
            Ok(boundary) => boundary,
            Err(e) => {
                error!(url = %seed, error = %e, "invalid seed URL, nothing to crawl");
                return failed_seed_report(seed, e.to_string());
            }
        };
        let seed_url = boundary.seed().clone();

        let mut ctx = CrawlContext::new(boundary);

        // Pages still to crawl; the top of the stack is crawled next
        let mut stack: Vec<Url> = vec![seed_url.clone()];

        while let Some(url) = stack.pop() {
            // Discovered twice before being reached: the first pop wins
            if !ctx.visited.insert(url.as_str()) {
                continue;
            }

            info!("Scraping: {}", url);

            // Fetch, extract, save, and collect the links to follow
            let outcome = match process_page(
                &url,
                &ctx.boundary,
                &ctx.visited,
                &self.fetcher,
                &self.store,
            )
            .await
            {
                Ok(page) => {
                    // Reversed so the page's first link is popped next
                    stack.extend(page.links.into_iter().rev());

                    match page.saved {
                        Ok(path) => {
                            ctx.note_write(&path, &url);
                            PageOutcome::Saved { path }
                        }
                        // Already logged by process_page; links were still queued
                        Err(e) => PageOutcome::Unsaved {
                            reason: e.to_string(),
                        },
                    }
                }
                Err(e) => {
                    // Local failure: no save, no children, carry on with the stack
                    error!(url = %url, error = %e, "transport error, skipping page");
                    PageOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            ctx.visited.finish(url.as_str(), outcome);
        }

        info!("Crawl finished: {} page(s) visited", ctx.visited.len());

        CrawlReport::from_visited(seed_url.as_str(), &ctx.visited)
    }
}

// A report holding just the seed, marked Failed
fn failed_seed_report(seed: &str, reason: String) -> CrawlReport {
    let mut visited = VisitedSet::new();
    visited.insert(seed);
    visited.finish(seed, PageOutcome::Failed { reason });
    CrawlReport::from_visited(seed, &visited)
}

impl CrawlContext {
    fn new(boundary: ScopeBoundary) -> Self {
        Self {
            boundary,
            visited: VisitedSet::new(),
            written: HashMap::new(),
        }
    }

    // Two URLs can derive the same file (e.g. "page" and "page#top");
    // the later write wins, but say so
    fn note_write(&mut self, path: &Path, url: &Url) {
        if let Some(previous) = self.written.insert(path.to_path_buf(), url.to_string()) {
            warn!(
                path = %path.display(),
                previous = %previous,
                url = %url,
                "file overwritten by a different URL"
            );
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a stack instead of calling ourselves recursively?
//    - Each recursive call uses a stack frame (and here, a boxed future)
//    - A long chain of pages (page 1 -> page 2 -> ... -> page 10000) could
//      overflow the call stack
//    - A Vec on the heap grows as needed
//
// 2. Why push the links in reverse?
//    - pop() takes from the end
//    - Pushing [a, b, c] reversed leaves a on top, so a is crawled first,
//      just like a recursive loop over [a, b, c] would
//
// 3. Why check visited again after pop()?
//    - The same URL can be pushed by several pages before it is reached
//    - Only the first pop crawls it; the rest are skipped
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::save::FsStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// An in-memory site: URL -> HTML, anything else fails like a 404.
    /// Records every URL it was asked for.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        down: Vec<String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn down(mut self, url: &str) -> Self {
            self.down.push(url.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<'a> Fetcher for &'a FakeSite {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());

            if self.down.iter().any(|down| down == url) {
                return Err(FetchError::Connect {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                });
            }

            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn links(hrefs: &[&str]) -> String {
        let anchors: String = hrefs
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!("<html><body><main><p>page</p></main><nav>{}</nav></body></html>", anchors)
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_visits_once() {
        let site = FakeSite::default()
            .page("https://ex.com/docs", &links(&["/docs/b"]))
            .page("https://ex.com/docs/b", &links(&["/docs", "/docs/b", "/docs/b"]));
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(urls, vec!["https://ex.com/docs", "https://ex.com/docs/b"]);
        assert_eq!(site.requests(), vec!["https://ex.com/docs", "https://ex.com/docs/b"]);
    }

    #[tokio::test]
    async fn test_end_to_end_scope_and_files() {
        let seed_html = r#"
            <html><body>
                <main><h1>Docs home</h1><pre>let x = 1;
    let y = 2;</pre></main>
                <a href="/docs/a">A</a>
                <a href="https://ex.com/blog">Blog</a>
            </body></html>
        "#;
        let site = FakeSite::default()
            .page("https://ex.com/docs", seed_html)
            .page("https://ex.com/docs/a", &links(&[]))
            .page("https://ex.com/blog", &links(&[]));
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(urls, vec!["https://ex.com/docs", "https://ex.com/docs/a"]);
        assert!(!site.requests().contains(&"https://ex.com/blog".to_string()));
        assert_eq!(report.saved_count(), 2);

        let home = std::fs::read_to_string(dir.path().join("docs.txt")).unwrap();
        assert_eq!(home, "Docs home\n\nlet x = 1;\n    let y = 2;");
        assert!(dir.path().join("docs/a.txt").is_file());
    }

    #[tokio::test]
    async fn test_transport_failure_is_isolated() {
        let site = FakeSite::default()
            .page("https://ex.com/docs", &links(&["/docs/a", "/docs/c"]))
            .page("https://ex.com/docs/a", &links(&["/docs/a/child"]))
            .page("https://ex.com/docs/a/child", &links(&[]))
            .page("https://ex.com/docs/c", &links(&[]))
            .down("https://ex.com/docs/a");
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(
            urls,
            vec!["https://ex.com/docs", "https://ex.com/docs/a", "https://ex.com/docs/c"]
        );
        assert!(matches!(report.pages[1].outcome, PageOutcome::Failed { .. }));
        assert_eq!(report.failed_count(), 1);

        // The failed page's links were never seen
        assert!(!site.requests().contains(&"https://ex.com/docs/a/child".to_string()));
        assert!(dir.path().join("docs.txt").is_file());
        assert!(dir.path().join("docs/c.txt").is_file());
        assert!(!dir.path().join("docs/a.txt").exists());
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        // docs -> [a, b]; a -> [a1, b]; b -> [b1]
        // Recursion order: docs, a, a1, b, b1
        let site = FakeSite::default()
            .page("https://ex.com/docs", &links(&["/docs/a", "/docs/b"]))
            .page("https://ex.com/docs/a", &links(&["/docs/a1", "/docs/b"]))
            .page("https://ex.com/docs/a1", &links(&[]))
            .page("https://ex.com/docs/b", &links(&["/docs/b1"]))
            .page("https://ex.com/docs/b1", &links(&[]));
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(
            urls,
            vec![
                "https://ex.com/docs",
                "https://ex.com/docs/a",
                "https://ex.com/docs/a1",
                "https://ex.com/docs/b",
                "https://ex.com/docs/b1",
            ]
        );
        assert_eq!(site.requests().len(), 5);
    }

    #[tokio::test]
    async fn test_missing_body_saves_empty_file() {
        // html5ever always adds a <body>, except to frameset documents
        let site = FakeSite::default().page(
            "https://ex.com/docs",
            r#"<html><frameset><frame src="/docs/a"></frameset></html>"#,
        );
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        assert_eq!(report.saved_count(), 1);
        assert_eq!(std::fs::read_to_string(dir.path().join("docs.txt")).unwrap(), "");
    }

    #[tokio::test]
    async fn test_save_failure_keeps_crawling() {
        let site = FakeSite::default()
            .page("https://ex.com/docs", &links(&["/docs/a"]))
            .page("https://ex.com/docs/a", &links(&[]));
        let dir = TempDir::new().unwrap();
        // "docs" must be a directory for docs/a.txt; make it a file instead
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(dir.path().join("docs"), "in the way").unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        assert_eq!(report.pages.len(), 2);
        assert!(matches!(report.pages[0].outcome, PageOutcome::Saved { .. }));
        assert!(matches!(report.pages[1].outcome, PageOutcome::Unsaved { .. }));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_reported_as_failed() {
        let site = FakeSite::default();
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("not a url").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(urls, vec!["not a url"]);
        assert!(matches!(report.pages[0].outcome, PageOutcome::Failed { .. }));
        assert_eq!(report.failed_count(), 1);
        assert!(site.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fragment_link_overwrites_same_file() {
        // "page" and "page#top" are distinct URLs that derive the same file
        let site = FakeSite::default()
            .page("https://ex.com/docs", &links(&["/docs/page", "/docs/page#top"]))
            .page(
                "https://ex.com/docs/page",
                "<html><body><main><p>first</p></main></body></html>",
            )
            .page(
                "https://ex.com/docs/page#top",
                "<html><body><main><p>second</p></main></body></html>",
            );
        let dir = TempDir::new().unwrap();
        let crawler = Crawler::new(&site, FsStore::new(dir.path()));

        let report = crawler.crawl("https://ex.com/docs").await;

        let urls: Vec<_> = report.urls().collect();
        assert_eq!(
            urls,
            vec![
                "https://ex.com/docs",
                "https://ex.com/docs/page",
                "https://ex.com/docs/page#top",
            ]
        );
        assert_eq!(report.saved_count(), 3);

        let page_file = dir.path().join("docs/page.txt");
        assert_eq!(std::fs::read_to_string(page_file).unwrap(), "second");
    }

    #[test]
    fn test_note_write_keeps_latest_url() {
        let boundary = ScopeBoundary::from_seed("https://ex.com/docs").unwrap();
        let mut ctx = CrawlContext::new(boundary);
        let path = Path::new("scraped/docs/page.txt");

        ctx.note_write(path, &Url::parse("https://ex.com/docs/page").unwrap());
        ctx.note_write(path, &Url::parse("https://ex.com/docs/page#top").unwrap());

        assert_eq!(ctx.written.len(), 1);
        assert_eq!(
            ctx.written.get(path).map(String::as_str),
            Some("https://ex.com/docs/page#top")
        );
    }
}
