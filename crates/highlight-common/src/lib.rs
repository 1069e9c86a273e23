//! # highlight-common
//!
//! Shared utilities: configuration loading and telemetry setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{ConfigError, HighlightConfig};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
