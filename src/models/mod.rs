//! Data models

pub mod analytics;

pub use analytics::*;
