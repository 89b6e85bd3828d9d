//! # Utility Functions and Helpers
//!
//! - [`browser`]: Opening a URL with the platform's default browser
//! - [`logging`]: Tracing subscriber and color setup from CLI flags

pub mod browser;
pub mod logging;
