use std::collections::{HashSet, VecDeque};

use tracing::debug;

use sitewalk_core::FrontierItem;

pub mod filter;
pub mod normalize;

pub use filter::{admit, check, Admission};
pub use normalize::{canonical, host_of, normalize, resolve};

/// FIFO work queue. Popping oldest-first is what makes the traversal
/// breadth-first: every depth-d item is dequeued before any depth-d+1 item.
///
/// Items are expected to carry normalized URLs. A URL is accepted at most once
/// per crawl, so the first (shallowest) occurrence wins.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if this URL was already queued earlier in the crawl.
    pub fn push(&mut self, item: FrontierItem) -> bool {
        if !self.queued.insert(item.url.clone()) {
            return false;
        }
        self.queue.push_back(item);
        true
    }

    pub fn pop(&mut self) -> Option<FrontierItem> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything still waiting. Returns how many items were discarded.
    pub fn discard(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            debug!(dropped, "discarded remaining frontier items");
        }
        dropped
    }
}

/// Normalized URL keys already committed (or landed on after a form submit).
/// Append-only for the lifetime of a crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was newly inserted.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(FrontierItem::new("https://a.test/", 0));
        frontier.push(FrontierItem::new("https://a.test/a", 1));
        frontier.push(FrontierItem::new("https://a.test/b", 1));

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).map(|i| i.url).collect();
        assert_eq!(order, vec!["https://a.test/", "https://a.test/a", "https://a.test/b"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(FrontierItem::new("https://a.test/a", 1)));
        assert!(!frontier.push(FrontierItem::new("https://a.test/a", 2)));
        frontier.pop();
        assert!(!frontier.push(FrontierItem::new("https://a.test/a", 3)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_discard() {
        let mut frontier = Frontier::new();
        frontier.push(FrontierItem::new("https://a.test/a", 1));
        frontier.push(FrontierItem::new("https://a.test/b", 1));
        assert_eq!(frontier.discard(), 2);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_visited_append_only() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert("https://a.test/"));
        assert!(!visited.insert("https://a.test/"));
        assert!(visited.contains("https://a.test/"));
        assert_eq!(visited.len(), 1);
    }
}
