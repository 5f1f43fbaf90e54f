use std::ffi::OsString;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use serde_json::Value;
use tracing::{debug, info};

use sitewalk_core::{BrowserConfig, BrowserError, BrowserSession, Locator, WaitCondition};

use crate::scripts;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Resource count must hold still this long for the network to count as idle.
const IDLE_WINDOW: Duration = Duration::from_millis(500);
const DEFAULT_TAB_TIMEOUT: Duration = Duration::from_secs(30);

/// One Chrome process driving one tab.
pub struct ChromeSession {
    // Chrome is killed when this is dropped.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    pub fn launch(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let extra_args: Vec<OsString> = vec![
            // Required for running in Docker containers
            OsString::from("--no-sandbox"),
            OsString::from("--disable-dev-shm-usage"),
            OsString::from("--disable-gpu"),
        ];

        let mut builder = LaunchOptionsBuilder::default();
        builder
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .idle_browser_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .args(extra_args.iter().map(|a| a.as_ref()).collect());

        let chrome_path = config
            .chrome_path
            .clone()
            .or_else(|| std::env::var("CHROME_PATH").ok());
        if let Some(path) = chrome_path {
            builder.path(Some(std::path::PathBuf::from(path)));
        }

        let options = builder
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| BrowserError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        tab.set_default_timeout(DEFAULT_TAB_TIMEOUT);

        if let Some(ua) = &config.user_agent {
            tab.set_user_agent(ua, None, None)
                .map_err(|e| BrowserError::Launch(e.to_string()))?;
        }

        info!(headless = config.headless, "chrome session started");
        Ok(Self { _browser: browser, tab })
    }

    /// Evaluate and hand back the result as JSON. Results are stringified in
    /// the page so arrays and objects come back by value.
    fn eval_json(&self, expression: &str) -> Result<Value, BrowserError> {
        let wrapped = format!("JSON.stringify(({}))", expression);
        let result = self
            .tab
            .evaluate(&wrapped, false)
            .map_err(|e| BrowserError::Evaluation(e.to_string()))?;

        match result.value {
            Some(Value::String(json)) => {
                serde_json::from_str(&json).map_err(|e| BrowserError::Evaluation(e.to_string()))
            }
            // JSON.stringify(undefined)
            _ => Ok(Value::Null),
        }
    }

    fn eval_bool(&self, expression: &str) -> Result<bool, BrowserError> {
        Ok(self.eval_json(expression)?.as_bool().unwrap_or(false))
    }

    /// Run an element action script; `false` from the script means the
    /// element was not there.
    fn act(&self, script: &str, target: &str) -> Result<(), BrowserError> {
        if self.eval_bool(script)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(target.to_string()))
        }
    }

    fn load_state(&self) -> Option<(String, f64, u64)> {
        let state = self.eval_json(scripts::LOAD_STATE).ok()?;
        let ready = state.get(0)?.as_str()?.to_string();
        let origin = state.get(1)?.as_f64()?;
        let resources = state.get(2)?.as_u64()?;
        Some((ready, origin, resources))
    }

    /// Poll until a new document satisfies `wait`. `previous_origin` is the
    /// timeOrigin of the document we navigated away from.
    async fn wait_ready(
        &self,
        wait: WaitCondition,
        previous_origin: Option<f64>,
        deadline: Instant,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let mut idle_since: Option<(Instant, u64)> = None;

        loop {
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(timeout.as_millis() as u64));
            }

            if let Some((ready, origin, resources)) = self.load_state() {
                let fresh = previous_origin.map(|prev| origin != prev).unwrap_or(true);
                let satisfied = fresh
                    && match wait {
                        WaitCondition::DomContentLoaded => ready != "loading",
                        WaitCondition::Load => ready == "complete",
                        WaitCondition::NetworkIdle => {
                            if ready != "complete" {
                                idle_since = None;
                                false
                            } else {
                                match idle_since {
                                    Some((since, count)) if count == resources => {
                                        since.elapsed() >= IDLE_WINDOW
                                    }
                                    _ => {
                                        idle_since = Some((Instant::now(), resources));
                                        false
                                    }
                                }
                            }
                        }
                    };
                if satisfied {
                    return Ok(());
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(
        &mut self,
        url: &str,
        wait: WaitCondition,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let deadline = Instant::now() + timeout;
        let previous_origin = self.load_state().map(|(_, origin, _)| origin);

        debug!(url = %url, wait = %wait, "navigating");
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_ready(wait, previous_origin, deadline, timeout).await
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.tab.get_url())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::Evaluation(e.to_string()))
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, BrowserError> {
        self.eval_json(expression)
    }

    async fn element_exists(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.eval_bool(&scripts::exists(locator))
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.eval_bool(&scripts::visible(locator))
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), BrowserError> {
        self.act(&scripts::click(locator), &locator.to_string())
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.act(&scripts::fill(selector, value), selector)
    }

    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.act(
            &scripts::select_option(selector, value),
            &format!("{selector} option {value:?}"),
        )
    }

    async fn check(&mut self, selector: &str) -> Result<(), BrowserError> {
        self.act(&scripts::check(selector), selector)
    }

    async fn focus_and_press(&mut self, selector: &str, key: &str) -> Result<(), BrowserError> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|_| BrowserError::ElementNotFound(selector.to_string()))?;
        element
            .focus()
            .map_err(|e| BrowserError::Other(e.to_string()))?;
        self.tab
            .press_key(key)
            .map_err(|e| BrowserError::Other(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map(|_| ())
            .map_err(|_| BrowserError::Timeout(timeout.as_millis() as u64))
    }
}
