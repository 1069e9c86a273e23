//! Configuration loading

mod highlight_config;

pub use highlight_config::{ConfigError, HighlightConfig};
