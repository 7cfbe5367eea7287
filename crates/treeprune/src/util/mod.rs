pub mod format;
pub mod progress;

pub use format::{format_bytes, format_duration};
pub use progress::create_spinner;
