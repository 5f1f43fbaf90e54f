use tracing::debug;

use sitewalk_core::{BrowserSession, Locator};

/// Anything worth trying to fill: a form, or a loose input an SPA handles in script.
const FORM_PRESENCE: &str = "form, input[required], input[type='text'], input[type='email'], \
     input:not([type]), textarea";

/// Pure read query; an evaluation error counts as "no form".
pub async fn has_form<S>(session: &S) -> bool
where
    S: BrowserSession + ?Sized,
{
    match session.element_exists(&Locator::css(FORM_PRESENCE)).await {
        Ok(found) => found,
        Err(e) => {
            debug!(error = %e, "form presence query failed, treating as no form");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitewalk_core::testing::ScriptedSession;

    async fn detect(html: &str) -> bool {
        let session = ScriptedSession::new().page("https://a.test/", html).at("https://a.test/");
        has_form(&session).await
    }

    #[tokio::test]
    async fn test_detects_forms_and_loose_inputs() {
        assert!(detect("<form action='/x'></form>").await);
        assert!(detect("<input name='q'>").await);
        assert!(detect("<input type='email' name='e'>").await);
        assert!(detect("<input type='checkbox' required>").await);
        assert!(detect("<textarea></textarea>").await);
    }

    #[tokio::test]
    async fn test_no_form() {
        assert!(!detect("<p>static</p><input type='checkbox'>").await);
        assert!(!detect("<input type='hidden' name='csrf'>").await);
    }
}
