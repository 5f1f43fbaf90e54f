pub mod navigation;
pub mod orchestrator;
pub mod session;

pub use navigation::{navigate_with_fallback, NavigationOutcome};
pub use orchestrator::Crawler;
pub use session::{CrawlSession, CrawlState};
