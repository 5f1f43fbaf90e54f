use serde::{Deserialize, Serialize};

use crate::browser::WaitCondition;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal bounds, filters and form behaviour for one crawl.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CrawlConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(default = "default_true")]
    pub same_domain_only: bool,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default = "default_true")]
    pub auto_fill_forms: bool,
    /// When present and non-empty, replaces heuristic value generation entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_form_fields: Option<Vec<CustomFormField>>,
    /// Routes supplied by a static-analysis pass, seeded at depth 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_routes: Option<Vec<String>>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            same_domain_only: true,
            exclude_patterns: Vec::new(),
            include_patterns: Vec::new(),
            auto_fill_forms: true,
            custom_form_fields: None,
            seed_routes: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CustomFormField {
    pub selector: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BrowserConfig {
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default = "default_window")]
    pub window_size: (u32, u32),
    /// Falls back to the CHROME_PATH environment variable, then auto-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: default_window(),
            chrome_path: None,
            user_agent: None,
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

/// One step of the degrading navigation chain.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct NavigationStep {
    pub wait: WaitCondition,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_navigation_chain")]
    pub navigation_chain: Vec<NavigationStep>,
    #[serde(default = "default_navigation_settle")]
    pub navigation_settle_ms: u64,
    #[serde(default = "default_submit_settle")]
    pub submit_settle_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            navigation_chain: default_navigation_chain(),
            navigation_settle_ms: default_navigation_settle(),
            submit_settle_ms: default_submit_settle(),
        }
    }
}

impl TimingConfig {
    /// Zero settle delays, same chain. Used where waiting buys nothing.
    pub fn immediate() -> Self {
        Self {
            navigation_settle_ms: 0,
            submit_settle_ms: 0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_max_depth() -> u32 { 3 }
fn default_max_pages() -> usize { 50 }
fn default_true() -> bool { true }
fn default_window() -> (u32, u32) { (1920, 1080) }
fn default_idle_timeout() -> u64 { 300 }
fn default_navigation_settle() -> u64 { 1000 }
fn default_submit_settle() -> u64 { 2000 }
fn default_report_path() -> String { "sitewalk-report.json".to_string() }

fn default_navigation_chain() -> Vec<NavigationStep> {
    vec![
        NavigationStep { wait: WaitCondition::NetworkIdle, timeout_ms: 30_000 },
        NavigationStep { wait: WaitCondition::Load, timeout_ms: 15_000 },
        NavigationStep { wait: WaitCondition::DomContentLoaded, timeout_ms: 10_000 },
    ]
}
