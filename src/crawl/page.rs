// src/crawl/page.rs
// =============================================================================
// Processes one page: fetch, extract, save, find links.
//
// Failure rules:
// - fetch fails            -> Err(FetchError); the caller skips the page
// - no content region      -> warning, empty text, links still collected
// - save fails             -> error logged, page marked Unsaved, links still
//                             collected
// =============================================================================

use std::path::PathBuf;
use tracing::{debug, error, warn};
use url::Url;

use super::visited::VisitedSet;
use crate::extract::{discover_links, extract_text, select_content, HtmlTree, PageTree};
use crate::fetch::{FetchError, Fetcher};
use crate::save::{PageStore, SavePath, StoreError};
use crate::scope::ScopeBoundary;

/// Text of one page plus where it should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub text: String,
    pub save_path: SavePath,
}

/// Result of a page that was fetched successfully
#[derive(Debug)]
pub struct ProcessedPage {
    /// Where the text was written, or why it wasn't
    pub saved: Result<PathBuf, StoreError>,
    /// In-scope, unvisited links in document order
    pub links: Vec<Url>,
}

/// Fetches `url`, saves its main text and returns the links to follow
pub async fn process_page<F, S>(
    url: &Url,
    boundary: &ScopeBoundary,
    visited: &VisitedSet,
    fetcher: &F,
    store: &S,
) -> Result<ProcessedPage, FetchError>
where
    F: Fetcher + ?Sized,
    S: PageStore + ?Sized,
{
    let html = fetcher.fetch(url.as_str()).await?;

    // The parsed tree is dropped here, before the next await
    let (page, links) = {
        let tree = HtmlTree::parse(&html);
        extract_page(&tree, url, boundary, visited)
    };

    let saved = store.save(&page.save_path, &page.text).await;
    if let Err(e) = &saved {
        error!(url = %url, error = %e, "filesystem error, page not saved");
    }

    Ok(ProcessedPage { saved, links })
}

/// Pulls the text, save path and in-scope links out of a parsed page
pub fn extract_page<T: PageTree>(
    tree: &T,
    url: &Url,
    boundary: &ScopeBoundary,
    visited: &VisitedSet,
) -> (ExtractedPage, Vec<Url>) {
    let text = match select_content(tree) {
        Some((region, node)) => {
            debug!(url = %url, ?region, "content region selected");
            extract_text(&node)
        }
        None => {
            warn!(url = %url, "could not find main content area, saving empty file");
            String::new()
        }
    };

    let page = ExtractedPage {
        text,
        save_path: SavePath::from_url(url),
    };
    let links = discover_links(tree, url, boundary, visited);

    (page, links)
}
