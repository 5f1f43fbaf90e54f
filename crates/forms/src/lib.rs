pub mod detection;
pub mod form_filler;
pub mod heuristics;

use tracing::{info, warn};

use sitewalk_core::{BrowserSession, CustomFormField};

pub use detection::*;
pub use form_filler::{fill_fields, FillOutcome};
pub use heuristics::{generate, resolve_fields, value_for};

/// What one detect → scan → fill → submit pass did on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormAttempt {
    pub fields_found: usize,
    pub fields_filled: usize,
    pub submit: SubmitOutcome,
}

/// Run one form pass on the session's current page.
///
/// `None` when the page shows no form at all. Once a form is detected the
/// submit step always runs, even with nothing filled: age gates and cookie
/// walls are forms without fields.
pub async fn interact<S>(session: &mut S, custom: Option<&[CustomFormField]>) -> Option<FormAttempt>
where
    S: BrowserSession + ?Sized,
{
    if !has_form(session).await {
        return None;
    }

    let fields = match session.content().await {
        Ok(html) => scan_fields(&html),
        Err(e) => {
            warn!(error = %e, "form detected but page content unreadable");
            Vec::new()
        }
    };

    let instructions = resolve_fields(&fields, custom);
    let filled = fill_fields(session, &instructions).await;

    let submit = submit(session, &fields).await;

    info!(
        found = fields.len(),
        filled = filled.filled,
        failed = filled.failed.len(),
        submitted = submit.fired(),
        "form pass finished"
    );

    Some(FormAttempt {
        fields_found: fields.len(),
        fields_filled: filled.filled,
        submit,
    })
}
