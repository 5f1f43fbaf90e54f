use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// How long `navigate` waits before reporting success, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitCondition {
    /// Load event fired and no resource activity for a short quiet window.
    NetworkIdle,
    /// Load event fired.
    Load,
    /// DOM parsed; subresources may still be loading.
    DomContentLoaded,
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WaitCondition::NetworkIdle => "network_idle",
            WaitCondition::Load => "load",
            WaitCondition::DomContentLoaded => "dom_content_loaded",
        };
        f.write_str(s)
    }
}

/// Addresses an element either by CSS selector or by its visible text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    /// First element matching `scope` whose trimmed text (or `value` for
    /// inputs) equals `text`, ignoring ASCII case.
    Text { scope: String, text: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn text(scope: impl Into<String>, text: impl Into<String>) -> Self {
        Locator::Text {
            scope: scope.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(sel) => f.write_str(sel),
            Locator::Text { scope, text } => write!(f, "{scope} with text {text:?}"),
        }
    }
}

/// A single live browser page. The crawler owns exactly one and drives it
/// sequentially; mutating operations take `&mut self` for that reason.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate and block until `wait` is satisfied or `timeout` elapses.
    async fn navigate(
        &mut self,
        url: &str,
        wait: WaitCondition,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// URL of the document currently loaded (after redirects / client routing).
    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Serialized rendered DOM.
    async fn content(&self) -> Result<String, BrowserError>;

    /// Evaluate a JavaScript expression and return its JSON-serializable result.
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value, BrowserError>;

    async fn element_exists(&self, locator: &Locator) -> Result<bool, BrowserError>;

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError>;

    async fn click(&mut self, locator: &Locator) -> Result<(), BrowserError>;

    /// Replace the value of a text-like control, firing input/change events.
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Select the option whose value or label matches `value`.
    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), BrowserError>;

    async fn check(&mut self, selector: &str) -> Result<(), BrowserError>;

    async fn focus_and_press(&mut self, selector: &str, key: &str) -> Result<(), BrowserError>;

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    async fn wait_for_timeout(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
