pub mod html;
pub mod router;

use std::collections::HashSet;

use tracing::{debug, warn};

use sitewalk_core::BrowserSession;
use sitewalk_frontier::{canonical, normalize::is_navigable, resolve};

pub use html::{PageSnapshot, Strategy};

/// Links found on one page. `ok` is false when the page could not be read at
/// all, in which case `links` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub links: Vec<String>,
    pub ok: bool,
}

impl Extraction {
    fn failed() -> Self {
        Self { links: Vec::new(), ok: false }
    }
}

/// Runs every discovery strategy against a page and merges the results into
/// one ordered, deduplicated list of normalized absolute URLs.
pub struct LinkExtractor {
    strategies: Vec<(&'static str, Strategy)>,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self {
            strategies: vec![
                ("anchors", html::anchors as Strategy),
                ("spa_markers", html::spa_markers),
                ("nav_landmarks", html::nav_landmarks),
                ("router_config", html::router_config),
            ],
        }
    }
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, name: &'static str, strategy: Strategy) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    /// Snapshot the session's current page and extract from it.
    ///
    /// Never fails: an unreadable page degrades to an empty, `ok: false`
    /// result. A failing router probe only costs that one strategy.
    pub async fn extract<S>(&self, session: &S) -> Extraction
    where
        S: BrowserSession + ?Sized,
    {
        let page_url = match session.current_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot read current URL, no links extracted");
                return Extraction::failed();
            }
        };

        let html = match session.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %page_url, error = %e, "cannot read page content, no links extracted");
                return Extraction::failed();
            }
        };

        let router_paths = match session.evaluate(router::ROUTER_PROBE).await {
            Ok(value) => router::parse_router_paths(&value),
            Err(e) => {
                debug!(url = %page_url, error = %e, "router probe failed");
                Vec::new()
            }
        };

        let snapshot = PageSnapshot::parse(&page_url, &html, router_paths);
        Extraction {
            links: self.extract_from(&snapshot),
            ok: true,
        }
    }

    /// Merge, resolve, normalize, dedup. First occurrence keeps its position.
    pub fn extract_from(&self, page: &PageSnapshot) -> Vec<String> {
        let base = page.base_url();
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for (name, strategy) in &self.strategies {
            let raw = strategy(page);
            debug!(url = %page.url, strategy = name, candidates = raw.len(), "strategy finished");

            for candidate in raw {
                let Some(resolved) = resolve(&candidate, &base) else {
                    continue;
                };
                if !is_navigable(&resolved) {
                    continue;
                }
                let key = canonical(&resolved);
                if seen.insert(key.clone()) {
                    links.push(key);
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewalk_core::testing::ScriptedSession;

    #[test]
    fn test_merge_and_dedup() {
        let page = PageSnapshot::parse(
            "https://a.test/shop/",
            r#"<nav><a href="/x">x</a><a href="/x/#top">x again</a></nav>
               <a href="item?id=2">item</a>
               <a href="mailto:sales@a.test">mail</a>
               <a href="javascript:void(0)">js</a>
               <a href="https://other.test/y">other</a>
               <div data-link="/cart/"></div>"#,
            vec!["/account".into()],
        );
        let links = LinkExtractor::new().extract_from(&page);
        assert_eq!(
            links,
            vec![
                "https://a.test/x",
                "https://a.test/shop/item?id=2",
                "https://other.test/y",
                "https://a.test/cart",
                "https://a.test/account",
            ]
        );
    }

    #[test]
    fn test_svg_animation_is_not_a_link() {
        let page = PageSnapshot::parse(
            "https://a.test/",
            r#"<svg><circle r="1"><animate attributeName="r" from="1" to="10" dur="1s"/></circle></svg>"#,
            vec![],
        );
        assert!(LinkExtractor::new().extract_from(&page).is_empty());
    }

    #[test]
    fn test_custom_strategy_added() {
        fn meta_refresh(_: &PageSnapshot) -> Vec<String> {
            vec!["/refreshed".to_string()]
        }
        let page = PageSnapshot::parse("https://a.test/", "<p></p>", vec![]);
        let links = LinkExtractor::new()
            .with_strategy("meta_refresh", meta_refresh)
            .extract_from(&page);
        assert_eq!(links, vec!["https://a.test/refreshed"]);
    }

    #[tokio::test]
    async fn test_extract_resolves_against_current_page() {
        let session = ScriptedSession::new()
            .page("https://a.test/docs/intro", r#"<a href="setup">next</a>"#)
            .router_paths("https://a.test/docs/intro", &["/changelog"])
            .at("https://a.test/docs/intro");

        let extraction = LinkExtractor::new().extract(&session).await;
        assert!(extraction.ok);
        assert_eq!(
            extraction.links,
            vec!["https://a.test/docs/setup", "https://a.test/changelog"]
        );
    }

    #[tokio::test]
    async fn test_unreadable_page_degrades_to_empty() {
        let session = ScriptedSession::new()
            .page("https://a.test/", r#"<a href="/x">x</a>"#)
            .broken_content("https://a.test/")
            .at("https://a.test/");

        let extraction = LinkExtractor::new().extract(&session).await;
        assert_eq!(extraction, Extraction { links: vec![], ok: false });
    }

    #[tokio::test]
    async fn test_router_probe_failure_keeps_dom_links() {
        let session = ScriptedSession::new()
            .page("https://a.test/", r#"<a href="/x">x</a>"#)
            .broken_evaluation()
            .at("https://a.test/");

        let extraction = LinkExtractor::new().extract(&session).await;
        assert!(extraction.ok);
        assert_eq!(extraction.links, vec!["https://a.test/x"]);
    }
}
