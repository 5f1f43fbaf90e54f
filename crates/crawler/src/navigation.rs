use std::time::Duration;

use tracing::{debug, warn};

use sitewalk_core::{BrowserError, BrowserSession, TimingConfig, WaitCondition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// `attempts` counts the failed steps before the one that worked.
    Loaded { wait: WaitCondition, attempts: usize },
    Failed { last_error: Option<BrowserError> },
}

impl NavigationOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, NavigationOutcome::Loaded { .. })
    }
}

/// Walk the configured chain from the strictest wait condition to the
/// loosest. The first step that succeeds is followed by the settle delay.
pub async fn navigate_with_fallback<S>(session: &mut S, url: &str, timing: &TimingConfig) -> NavigationOutcome
where
    S: BrowserSession + ?Sized,
{
    let mut last_error = None;

    for (attempts, step) in timing.navigation_chain.iter().enumerate() {
        let timeout = Duration::from_millis(step.timeout_ms);
        match session.navigate(url, step.wait, timeout).await {
            Ok(()) => {
                if attempts > 0 {
                    debug!(url = %url, wait = %step.wait, attempts, "navigation succeeded on fallback");
                }
                session
                    .wait_for_timeout(Duration::from_millis(timing.navigation_settle_ms))
                    .await;
                return NavigationOutcome::Loaded { wait: step.wait, attempts };
            }
            Err(e) => {
                debug!(url = %url, wait = %step.wait, error = %e, "navigation step failed");
                last_error = Some(e);
            }
        }
    }

    warn!(url = %url, "all navigation strategies failed");
    NavigationOutcome::Failed { last_error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewalk_core::testing::ScriptedSession;
    use sitewalk_core::NavigationStep;

    const URL: &str = "https://a.test/slow";

    #[tokio::test]
    async fn test_strictest_wait_first() {
        let mut session = ScriptedSession::new().page(URL, "<p>ok</p>");
        let outcome = navigate_with_fallback(&mut session, URL, &TimingConfig::immediate()).await;
        assert_eq!(outcome, NavigationOutcome::Loaded { wait: WaitCondition::NetworkIdle, attempts: 0 });
        assert_eq!(session.navigations.len(), 1);
    }

    #[tokio::test]
    async fn test_degrades_through_chain() {
        let mut session = ScriptedSession::new()
            .page(URL, "<p>ok</p>")
            .failing_wait(URL, WaitCondition::NetworkIdle)
            .failing_wait(URL, WaitCondition::Load);

        let outcome = navigate_with_fallback(&mut session, URL, &TimingConfig::immediate()).await;
        assert_eq!(outcome, NavigationOutcome::Loaded { wait: WaitCondition::DomContentLoaded, attempts: 2 });
        assert_eq!(
            session.navigations.iter().map(|(_, w)| *w).collect::<Vec<_>>(),
            vec![WaitCondition::NetworkIdle, WaitCondition::Load, WaitCondition::DomContentLoaded]
        );
    }

    #[tokio::test]
    async fn test_exhausted_chain() {
        let mut session = ScriptedSession::new().unreachable(URL);
        let outcome = navigate_with_fallback(&mut session, URL, &TimingConfig::immediate()).await;
        assert!(!outcome.is_loaded());
        assert_eq!(
            outcome,
            NavigationOutcome::Failed { last_error: Some(BrowserError::Timeout(10_000)) }
        );
    }

    #[tokio::test]
    async fn test_custom_chain() {
        let timing = TimingConfig {
            navigation_chain: vec![NavigationStep { wait: WaitCondition::Load, timeout_ms: 500 }],
            ..TimingConfig::immediate()
        };
        let mut session = ScriptedSession::new().failing_wait(URL, WaitCondition::Load);
        let outcome = navigate_with_fallback(&mut session, URL, &timing).await;
        assert_eq!(outcome, NavigationOutcome::Failed { last_error: Some(BrowserError::Timeout(500)) });
    }
}
