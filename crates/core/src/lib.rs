pub mod browser;
pub mod config;
pub mod error;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;

pub use browser::{BrowserSession, Locator, WaitCondition};
pub use config::{AppConfig, BrowserConfig, CrawlConfig, CustomFormField, NavigationStep, TimingConfig};
pub use error::{BrowserError, CrawlError};
pub use types::*;
