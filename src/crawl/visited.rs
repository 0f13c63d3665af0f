// src/crawl/visited.rs
// =============================================================================
// The set of URLs the crawl has already claimed.
//
// A URL goes in *before* its fetch starts and never comes out, so a page that
// links to itself or to an ancestor can't be crawled twice. Insertion order is
// kept because it is also the visitation order reported at the end.
// =============================================================================

use std::collections::HashMap;

use super::report::PageOutcome;

/// Where a claimed URL is in its lifecycle
///
/// Unvisited -> InProgress -> Finished(Saved | Unsaved | Failed).
/// Nothing is ever retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitState {
    InProgress,
    Finished(PageOutcome),
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    order: Vec<String>,
    states: HashMap<String, VisitState>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL. Returns false if it was already claimed.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.states.contains_key(url) {
            return false;
        }
        self.states.insert(url.to_string(), VisitState::InProgress);
        self.order.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.states.contains_key(url)
    }

    /// Records how a claimed URL finished. Unknown URLs are ignored.
    pub fn finish(&mut self, url: &str, outcome: PageOutcome) {
        if let Some(state) = self.states.get_mut(url) {
            *state = VisitState::Finished(outcome);
        }
    }

    /// Claimed URLs with their state, in the order they were claimed
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VisitState)> {
        self.order
            .iter()
            .filter_map(|url| self.states.get(url).map(|state| (url.as_str(), state)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
