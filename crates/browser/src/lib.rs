//! Chrome-backed implementation of [`sitewalk_core::BrowserSession`].

mod chrome;
pub mod scripts;

pub use chrome::ChromeSession;
