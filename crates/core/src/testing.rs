//! In-memory [`BrowserSession`] for tests.
//!
//! A `ScriptedSession` serves a fixed site: URL → rendered HTML, plus the
//! transitions that clicks and Enter presses cause. Element queries parse the
//! stored HTML with `scraper`, so real CSS selectors are exercised. Every
//! `evaluate` call is answered with the current page's router paths.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::browser::{BrowserSession, Locator, WaitCondition};
use crate::error::BrowserError;

const BLANK_PAGE: &str = "<html><head></head><body></body></html>";

#[derive(Debug, Default, Clone)]
struct ScriptedPage {
    html: String,
    router_paths: Vec<String>,
    clicks: HashMap<String, String>,
    enter_target: Option<String>,
    failing_waits: HashSet<WaitCondition>,
    broken_content: bool,
}

#[derive(Debug, Default)]
pub struct ScriptedSession {
    pages: HashMap<String, ScriptedPage>,
    redirects: HashMap<String, String>,
    hidden: HashSet<String>,
    evaluation_broken: bool,
    current: Option<String>,

    pub navigations: Vec<(String, WaitCondition)>,
    pub clicked: Vec<String>,
    pub filled: Vec<(String, String)>,
    pub selected: Vec<(String, String)>,
    pub checked: Vec<String>,
    pub pressed: Vec<(String, String)>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, url: &str) -> &mut ScriptedPage {
        self.pages.entry(url.to_string()).or_insert_with(|| ScriptedPage {
            html: BLANK_PAGE.to_string(),
            ..ScriptedPage::default()
        })
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.entry(url).html = html.to_string();
        self
    }

    pub fn router_paths(mut self, url: &str, paths: &[&str]) -> Self {
        self.entry(url).router_paths = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Clicking `locator` (matched by its `Display` form) on `url` loads `target`.
    pub fn on_click(mut self, url: &str, locator: &Locator, target: &str) -> Self {
        self.entry(url).clicks.insert(locator.to_string(), target.to_string());
        self
    }

    /// Pressing Enter in any field on `url` loads `target`.
    pub fn on_enter(mut self, url: &str, target: &str) -> Self {
        self.entry(url).enter_target = Some(target.to_string());
        self
    }

    /// Every wait condition fails for `url`.
    pub fn unreachable(mut self, url: &str) -> Self {
        let page = self.entry(url);
        page.failing_waits.insert(WaitCondition::NetworkIdle);
        page.failing_waits.insert(WaitCondition::Load);
        page.failing_waits.insert(WaitCondition::DomContentLoaded);
        self
    }

    pub fn failing_wait(mut self, url: &str, wait: WaitCondition) -> Self {
        self.entry(url).failing_waits.insert(wait);
        self
    }

    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.redirects.insert(from.to_string(), to.to_string());
        self
    }

    pub fn broken_content(mut self, url: &str) -> Self {
        self.entry(url).broken_content = true;
        self
    }

    pub fn broken_evaluation(mut self) -> Self {
        self.evaluation_broken = true;
        self
    }

    /// Treat elements matching this CSS selector as invisible.
    pub fn hidden(mut self, selector: &str) -> Self {
        self.hidden.insert(selector.to_string());
        self
    }

    /// Load `url` without going through `navigate`.
    pub fn at(mut self, url: &str) -> Self {
        self.entry(url);
        self.current = Some(url.to_string());
        self
    }

    pub fn navigated_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for (url, _) in &self.navigations {
            if urls.last() != Some(&url.as_str()) {
                urls.push(url);
            }
        }
        urls
    }

    fn current_page(&self) -> Option<&ScriptedPage> {
        self.current.as_ref().and_then(|u| self.pages.get(u))
    }

    fn current_html(&self) -> String {
        self.current_page()
            .map(|p| p.html.clone())
            .unwrap_or_else(|| BLANK_PAGE.to_string())
    }

    fn load(&mut self, url: &str) {
        let landed = self.redirects.get(url).cloned().unwrap_or_else(|| url.to_string());
        self.current = Some(landed);
    }

    fn matches(&self, locator: &Locator) -> Result<bool, BrowserError> {
        let document = Html::parse_document(&self.current_html());
        match locator {
            Locator::Css(sel) => {
                let selector = parse_selector(sel)?;
                let found = document.select(&selector).next().is_some();
                Ok(found)
            }
            Locator::Text { scope, text } => {
                let selector = parse_selector(scope)?;
                let found = document.select(&selector).any(|el| text_matches(&el, text));
                Ok(found)
            }
        }
    }

    fn is_hidden(&self, locator: &Locator) -> Result<bool, BrowserError> {
        let document = Html::parse_document(&self.current_html());
        for hidden in &self.hidden {
            let hidden_sel = parse_selector(hidden)?;
            let hidden_ids: Vec<_> = document.select(&hidden_sel).map(|el| el.id()).collect();
            let matched: Vec<_> = match locator {
                Locator::Css(sel) => document.select(&parse_selector(sel)?).map(|el| el.id()).collect(),
                Locator::Text { scope, text } => document
                    .select(&parse_selector(scope)?)
                    .filter(|el| text_matches(el, text))
                    .map(|el| el.id())
                    .collect(),
            };
            if !matched.is_empty() && matched.iter().all(|id| hidden_ids.contains(id)) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn require(&self, locator: &Locator) -> Result<(), BrowserError> {
        if self.matches(locator)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(locator.to_string()))
        }
    }
}

fn parse_selector(sel: &str) -> Result<Selector, BrowserError> {
    Selector::parse(sel).map_err(|e| BrowserError::Evaluation(format!("bad selector {sel}: {e:?}")))
}

fn text_matches(el: &ElementRef, text: &str) -> bool {
    let inner = el.text().collect::<String>();
    if inner.trim().eq_ignore_ascii_case(text) {
        return true;
    }
    el.value()
        .attr("value")
        .map(|v| v.trim().eq_ignore_ascii_case(text))
        .unwrap_or(false)
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn navigate(
        &mut self,
        url: &str,
        wait: WaitCondition,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.navigations.push((url.to_string(), wait));
        let fails = self
            .pages
            .get(url)
            .map(|p| p.failing_waits.contains(&wait))
            .unwrap_or(false);
        if fails {
            return Err(BrowserError::Timeout(timeout.as_millis() as u64));
        }
        self.load(url);
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.current.clone().unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn content(&self) -> Result<String, BrowserError> {
        if self.current_page().map(|p| p.broken_content).unwrap_or(false) {
            return Err(BrowserError::Evaluation("execution context destroyed".to_string()));
        }
        Ok(self.current_html())
    }

    async fn evaluate(&self, _expression: &str) -> Result<serde_json::Value, BrowserError> {
        if self.evaluation_broken {
            return Err(BrowserError::Evaluation("evaluation disabled".to_string()));
        }
        let paths = self
            .current_page()
            .map(|p| p.router_paths.clone())
            .unwrap_or_default();
        Ok(serde_json::Value::from(paths))
    }

    async fn element_exists(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.matches(locator)
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        Ok(self.matches(locator)? && !self.is_hidden(locator)?)
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), BrowserError> {
        self.require(locator)?;
        let key = locator.to_string();
        self.clicked.push(key.clone());
        let target = self.current_page().and_then(|p| p.clicks.get(&key).cloned());
        if let Some(target) = target {
            self.load(&target);
        }
        Ok(())
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.require(&Locator::css(selector))?;
        self.filled.push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let option = format!("{selector} option");
        let document = Html::parse_document(&self.current_html());
        let has_option = document
            .select(&parse_selector(&option)?)
            .any(|el| text_matches(&el, value));
        if !has_option {
            return Err(BrowserError::ElementNotFound(format!("{selector} option {value:?}")));
        }
        self.selected.push((selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn check(&mut self, selector: &str) -> Result<(), BrowserError> {
        self.require(&Locator::css(selector))?;
        self.checked.push(selector.to_string());
        Ok(())
    }

    async fn focus_and_press(&mut self, selector: &str, key: &str) -> Result<(), BrowserError> {
        self.require(&Locator::css(selector))?;
        self.pressed.push((selector.to_string(), key.to_string()));
        if key == "Enter" {
            let target = self.current_page().and_then(|p| p.enter_target.clone());
            if let Some(target) = target {
                self.load(&target);
            }
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        if self.matches(&Locator::css(selector))? {
            Ok(())
        } else {
            Err(BrowserError::Timeout(timeout.as_millis() as u64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_click_transition_and_visibility() {
        let submit = Locator::css("button[type='submit']");
        let mut session = ScriptedSession::new()
            .page("https://a.test/login", r#"<form><input name="u"><button type="submit">Go</button><a class="x">x</a></form>"#)
            .on_click("https://a.test/login", &submit, "https://a.test/home")
            .hidden("a.x")
            .at("https://a.test/login");

        assert!(session.is_visible(&submit).await.unwrap());
        assert!(session.is_visible(&Locator::text("button", "go")).await.unwrap());
        assert!(!session.is_visible(&Locator::css("a.x")).await.unwrap());

        session.click(&submit).await.unwrap();
        assert_eq!(session.current_url().await.unwrap(), "https://a.test/home");
    }

    #[tokio::test]
    async fn test_missing_element_errors() {
        let mut session = ScriptedSession::new().page("https://a.test/", "<p>hi</p>").at("https://a.test/");
        let err = session.fill("#nope", "x").await.unwrap_err();
        assert_eq!(err, BrowserError::ElementNotFound("#nope".to_string()));
    }
}
