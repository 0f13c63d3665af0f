// src/extract/content.rs
// =============================================================================
// Picks the "main content" region of a page and turns it into plain text.
//
// Region choice, first match wins:
//   <main>  ->  element with id="main"  ->  <body>  ->  nothing
//
// Text rules, applied to the region's *direct* children only:
// - <pre>/<code>: raw text, whitespace kept byte-for-byte
// - anything else: each descendant text node trimmed, empty ones dropped,
//   the rest joined with "\n"
// Text inside <script>, <style> and <template> never counts.
// The per-child pieces are joined with a blank line ("\n\n").
// =============================================================================

use super::tree::{ContentNode, PageTree};

/// Tags whose text is kept verbatim
const PREFORMATTED_TAGS: &[&str] = &["pre", "code"];

/// Which part of the page the text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRegion {
    Main,
    MainId,
    Body,
}

/// Finds the content region, or None for a document without any of the three
pub fn select_content<T: PageTree>(tree: &T) -> Option<(ContentRegion, T::Node<'_>)> {
    if let Some(node) = tree.find_by_tag("main") {
        return Some((ContentRegion::Main, node));
    }
    if let Some(node) = tree.find_by_id("main") {
        return Some((ContentRegion::MainId, node));
    }
    tree.find_by_tag("body").map(|node| (ContentRegion::Body, node))
}

/// Extracts the text of a content region
pub fn extract_text<N: ContentNode>(region: &N) -> String {
    region
        .element_children()
        .iter()
        .map(child_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn child_text<N: ContentNode>(child: &N) -> String {
    let tag = child.tag_name();
    if PREFORMATTED_TAGS.iter().any(|preformatted| *preformatted == tag) {
        return child.text_nodes().concat();
    }

    child
        .text_nodes()
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
