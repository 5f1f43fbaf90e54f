use tracing::{debug, info, warn};

use sitewalk_core::{BrowserSession, FieldKind, FormFieldMeta, Locator};

pub const BUTTON_LIKE: &str = "button, [role='button'], input[type='button']";

const BUTTON_LABELS: &[&str] = &["Submit", "Continue", "Next", "Go", "Enter"];

const SUBMIT_NAMES: &[&str] = &[
    "#submit",
    "#submit-button",
    "#submitBtn",
    "#btn-submit",
    ".submit",
    ".submit-button",
    ".btn-submit",
    "[name='submit']",
];

/// Submit triggers in the order they are tried.
pub fn submit_triggers() -> Vec<Locator> {
    let mut triggers = vec![
        Locator::css("button[type='submit']"),
        Locator::css("input[type='submit']"),
    ];
    triggers.extend(BUTTON_LABELS.iter().map(|label| Locator::text(BUTTON_LIKE, *label)));
    triggers.push(Locator::css("form button"));
    triggers.extend(SUBMIT_NAMES.iter().map(|sel| Locator::css(*sel)));
    triggers
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Clicked(Locator),
    PressedEnter(String),
    NotSubmitted,
}

impl SubmitOutcome {
    /// A submission action fired. Says nothing about whether it worked.
    pub fn fired(&self) -> bool {
        !matches!(self, SubmitOutcome::NotSubmitted)
    }
}

/// Click the first visible trigger; failing that, press Enter in the last
/// text input or textarea of `fields`.
pub async fn submit<S>(session: &mut S, fields: &[FormFieldMeta]) -> SubmitOutcome
where
    S: BrowserSession + ?Sized,
{
    for trigger in submit_triggers() {
        match session.is_visible(&trigger).await {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                debug!(trigger = %trigger, error = %e, "submit trigger query failed");
                continue;
            }
        }

        match session.click(&trigger).await {
            Ok(()) => {
                info!(trigger = %trigger, "clicked submit trigger");
                return SubmitOutcome::Clicked(trigger);
            }
            Err(e) => warn!(trigger = %trigger, error = %e, "submit trigger click failed"),
        }
    }

    let last_text = fields
        .iter()
        .rev()
        .find(|f| matches!(f.kind, FieldKind::Text | FieldKind::Textarea));

    if let Some(field) = last_text {
        match session.focus_and_press(&field.selector, "Enter").await {
            Ok(()) => {
                info!(selector = %field.selector, "no submit trigger, pressed Enter");
                return SubmitOutcome::PressedEnter(field.selector.clone());
            }
            Err(e) => warn!(selector = %field.selector, error = %e, "Enter fallback failed"),
        }
    }

    debug!("no submission fired");
    SubmitOutcome::NotSubmitted
}
