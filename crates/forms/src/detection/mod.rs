pub mod field_scanner;
pub mod form_detector;
pub mod submit_detector;

pub use field_scanner::*;
pub use form_detector::*;
pub use submit_detector::*;
