use thiserror::Error;

/// Failures reported by a browser session.
///
/// None of these abort a crawl on their own; the orchestrator decides whether
/// a failure means "try the next strategy", "skip this field" or "skip this page".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("{0}")]
    Other(String),
}

/// Failures that stop a crawl before it starts. Everything after the first
/// navigation is recorded in the report instead.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
