use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A URL waiting in the frontier together with its link distance from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub url: String,
    pub depth: u32,
}

impl FrontierItem {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self { url: url.into(), depth }
    }
}

/// A committed page, in discovery order. Handed to the screenshot stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredPage {
    pub url: String,
    pub depth: u32,
    pub discovered_at: DateTime<Utc>,
    /// Set when the page's screenshot should be a before/after form pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_interaction: Option<FormInteraction>,
}

impl DiscoveredPage {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
            discovered_at: Utc::now(),
            form_interaction: None,
        }
    }

    pub fn is_form_pair(&self) -> bool {
        self.form_interaction.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInteraction {
    pub before_url: String,
    pub after_url: String,
    pub fields_filled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Select,
    Checkbox,
    Radio,
    Textarea,
}

impl FieldKind {
    /// Map an `<input type=...>` value. `None` for controls we never fill.
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type.to_ascii_lowercase().as_str() {
            "" | "text" | "search" | "tel" | "url" => Some(FieldKind::Text),
            "email" => Some(FieldKind::Email),
            "password" => Some(FieldKind::Password),
            "number" => Some(FieldKind::Number),
            "checkbox" => Some(FieldKind::Checkbox),
            "radio" => Some(FieldKind::Radio),
            _ => None,
        }
    }

    pub fn is_text_like(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Email | FieldKind::Password | FieldKind::Number | FieldKind::Textarea
        )
    }
}

/// Metadata about one fillable control, read from the rendered DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldMeta {
    pub selector: String,
    pub kind: FieldKind,
    pub name: String,
    pub placeholder: String,
    pub label: String,
    pub required: bool,
}

/// A resolved fill instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub selector: String,
    pub value: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    FrontierExhausted,
    MaxPagesReached,
    Cancelled,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminationReason::FrontierExhausted => "frontier exhausted",
            TerminationReason::MaxPagesReached => "max pages reached",
            TerminationReason::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Why dequeued items were dropped instead of expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounters {
    pub already_visited: usize,
    pub too_deep: usize,
    pub filtered: usize,
    pub navigation_failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub pages: Vec<DiscoveredPage>,
    pub termination: TerminationReason,
    pub visited_count: usize,
    pub skipped: SkipCounters,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.url.as_str()).collect()
    }

    pub fn form_pairs(&self) -> impl Iterator<Item = &DiscoveredPage> {
        self.pages.iter().filter(|p| p.is_form_pair())
    }
}
