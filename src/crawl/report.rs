// src/crawl/report.rs
// =============================================================================
// What the crawl hands back: every visited URL, in visitation order, with
// what happened to it.
//
// #[derive(Serialize)] lets main.rs print the whole thing as JSON (--json).
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;

use super::visited::{VisitState, VisitedSet};

/// What happened to one visited page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Fetched, extracted and written
    Saved { path: PathBuf },
    /// Fetched and its links followed, but the file could not be written
    Unsaved { reason: String },
    /// Transport failure: nothing saved, no links followed
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitedPage {
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub pages: Vec<VisitedPage>,
}

impl CrawlReport {
    pub fn from_visited(seed: &str, visited: &VisitedSet) -> Self {
        let pages = visited
            .iter()
            .map(|(url, state)| VisitedPage {
                url: url.to_string(),
                outcome: match state {
                    VisitState::Finished(outcome) => outcome.clone(),
                    // Only reachable if the crawl loop was cut short
                    VisitState::InProgress => PageOutcome::Failed {
                        reason: "crawl stopped before the page finished".to_string(),
                    },
                },
            })
            .collect();

        Self {
            seed: seed.to_string(),
            pages,
        }
    }

    /// Visited URLs in visitation order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.url.as_str())
    }

    pub fn saved_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, PageOutcome::Saved { .. }))
    }

    pub fn unsaved_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, PageOutcome::Unsaved { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, PageOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&PageOutcome) -> bool) -> usize {
        self.pages.iter().filter(|page| predicate(&page.outcome)).count()
    }
}
