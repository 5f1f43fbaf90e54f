use tracing::{debug, warn};

use sitewalk_core::{BrowserError, BrowserSession, FieldKind, FormField};

#[derive(Debug, Default)]
pub struct FillOutcome {
    pub filled: usize,
    pub failed: Vec<(String, BrowserError)>,
}

/// Apply each instruction in order. A field that cannot be filled (missing,
/// stale, no such option) is logged and skipped; the rest are still tried.
pub async fn fill_fields<S>(session: &mut S, fields: &[FormField]) -> FillOutcome
where
    S: BrowserSession + ?Sized,
{
    let mut outcome = FillOutcome::default();

    for field in fields {
        let result = match field.kind {
            FieldKind::Select => session.select_option(&field.selector, &field.value).await,
            FieldKind::Checkbox | FieldKind::Radio => session.check(&field.selector).await,
            _ => session.fill(&field.selector, &field.value).await,
        };

        match result {
            Ok(()) => {
                debug!(selector = %field.selector, kind = ?field.kind, "filled field");
                outcome.filled += 1;
            }
            Err(e) => {
                warn!(selector = %field.selector, error = %e, "failed to fill field, skipping");
                outcome.failed.push((field.selector.clone(), e));
            }
        }
    }

    outcome
}
