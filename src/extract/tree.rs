// src/extract/tree.rs
// =============================================================================
// The parse-tree capability the extractor needs, and its scraper-backed
// implementation.
//
// Content selection and link discovery only need four things from a parsed
// page: find an element by tag name, find an element by id, walk an element's
// direct children, and list every anchor href. Outside this file only the
// two traits are used.
// =============================================================================

use scraper::{ElementRef, Html, Node};

/// Elements whose text is never page content
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "template"];

fn is_non_content_tag(name: &str) -> bool {
    NON_CONTENT_TAGS.iter().any(|tag| *tag == name)
}

fn is_non_content(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| is_non_content_tag(element.name()))
}

/// One element of a parsed page
pub trait ContentNode: Sized {
    /// Lower-case tag name, e.g. "pre"
    fn tag_name(&self) -> &str;

    /// Direct child elements in document order (text nodes skipped)
    fn element_children(&self) -> Vec<Self>;

    /// Every descendant text node, in document order, untouched.
    /// Text inside <script>, <style> and <template> is left out.
    fn text_nodes(&self) -> Vec<&str>;
}

/// A parsed page
pub trait PageTree {
    type Node<'a>: ContentNode
    where
        Self: 'a;

    /// First element (document order) with this tag name
    fn find_by_tag(&self, tag: &str) -> Option<Self::Node<'_>>;

    /// First element (document order) whose id attribute equals `id`
    fn find_by_id(&self, id: &str) -> Option<Self::Node<'_>>;

    /// href of every `<a href=...>` in the whole document, in document order
    fn anchor_hrefs(&self) -> Vec<&str>;
}

/// A page parsed with scraper (html5ever underneath)
pub struct HtmlTree {
    document: Html,
}

impl HtmlTree {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    // All elements in document order, starting with <html>
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

impl PageTree for HtmlTree {
    type Node<'a> = ElementRef<'a>;

    fn find_by_tag(&self, tag: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|element| element.value().name() == tag)
    }

    fn find_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|element| element.value().id() == Some(id))
    }

    fn anchor_hrefs(&self) -> Vec<&str> {
        self.elements()
            .filter(|element| element.value().name() == "a")
            .filter_map(|element| element.value().attr("href"))
            .collect()
    }
}

impl<'a> ContentNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn element_children(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn text_nodes(&self) -> Vec<&str> {
        if is_non_content_tag(self.value().name()) {
            return Vec::new();
        }

        let root = (**self).id();
        (**self)
            .descendants()
            .filter(|node| {
                // Skip text with a non-content ancestor below this element
                !node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != root)
                    .any(|ancestor| is_non_content(ancestor.value()))
            })
            .filter_map(|node| node.value().as_text().map(|text| &**text))
            .collect()
    }
}
