// src/extract/mod.rs
// =============================================================================
// Everything that reads a parsed page.
//
// Submodules:
// - tree: the PageTree / ContentNode capability and the scraper-backed HtmlTree
// - content: picks the main content region and flattens it to text
// - links: finds in-scope links to crawl next
// =============================================================================

mod content;
mod links;
mod tree;

pub use content::{extract_text, select_content, ContentRegion};
pub use links::discover_links;
pub use tree::{HtmlTree, PageTree};

#[cfg(test)]
pub(crate) use tree::fake;
