use chrono::{DateTime, Utc};

use sitewalk_core::{CrawlReport, DiscoveredPage, FrontierItem, SkipCounters, TerminationReason};
use sitewalk_frontier::{Frontier, VisitedSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Traversing,
    Terminated(TerminationReason),
}

/// All mutable state of one crawl. Created per run and consumed into the
/// report; nothing outlives it.
#[derive(Debug)]
pub struct CrawlSession {
    pub start_url: String,
    pub frontier: Frontier,
    pub visited: VisitedSet,
    pub discovered: Vec<DiscoveredPage>,
    pub skipped: SkipCounters,
    state: CrawlState,
    started_at: DateTime<Utc>,
}

impl CrawlSession {
    /// `start_url` must already be normalized.
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            discovered: Vec::new(),
            skipped: SkipCounters::default(),
            state: CrawlState::Idle,
            started_at: Utc::now(),
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn begin(&mut self) {
        self.started_at = Utc::now();
        self.state = CrawlState::Traversing;
    }

    /// Mark as visited and record the page. Returns its index in `discovered`.
    pub fn commit(&mut self, item: &FrontierItem) -> usize {
        self.visited.insert(item.url.clone());
        self.discovered.push(DiscoveredPage::new(item.url.clone(), item.depth));
        self.discovered.len() - 1
    }

    pub fn terminate(&mut self, reason: TerminationReason) {
        self.state = CrawlState::Terminated(reason);
    }

    pub fn into_report(self) -> CrawlReport {
        let termination = match self.state {
            CrawlState::Terminated(reason) => reason,
            // never ran to completion
            CrawlState::Idle | CrawlState::Traversing => TerminationReason::Cancelled,
        };
        CrawlReport {
            start_url: self.start_url,
            visited_count: self.visited.len(),
            pages: self.discovered,
            termination,
            skipped: self.skipped,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
