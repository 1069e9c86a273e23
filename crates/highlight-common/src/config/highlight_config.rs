//! Highlight pipeline configuration
//!
//! Loaded from environment variables with sensible defaults; the config is
//! consumed by the highlight services but owned by the surrounding
//! application.

use serde::Deserialize;
use std::env;

/// Configuration for the highlight promotion pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    /// The single reaction symbol that counts toward promotion
    #[serde(default = "default_emblem")]
    pub emblem: String,
    /// Minimum raw reaction count before a message is promoted
    #[serde(default = "default_min_reactions")]
    pub min_reactions: u32,
    /// Destination platform's per-field content length limit, in bytes
    #[serde(default = "default_field_limit")]
    pub field_limit: usize,
    /// Maximum content segments per post; the destination caps total post size
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
    /// Ordered tier labels, lowest tier first
    #[serde(default = "default_tier_labels")]
    pub tier_labels: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            emblem: default_emblem(),
            min_reactions: default_min_reactions(),
            field_limit: default_field_limit(),
            max_segments: default_max_segments(),
            tier_labels: default_tier_labels(),
        }
    }
}

impl HighlightConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparseable, or if the
    /// tier label list is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            emblem: env::var("HIGHLIGHT_EMBLEM").unwrap_or_else(|_| default_emblem()),
            min_reactions: parse_var("HIGHLIGHT_MIN_REACTIONS", default_min_reactions)?,
            field_limit: parse_var("HIGHLIGHT_FIELD_LIMIT", default_field_limit)?,
            max_segments: parse_var("HIGHLIGHT_MAX_SEGMENTS", default_max_segments)?,
            tier_labels: env::var("HIGHLIGHT_TIER_LABELS")
                .ok()
                .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                .unwrap_or_else(default_tier_labels),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tier_labels.is_empty() {
            return Err(ConfigError::InvalidValue(
                "HIGHLIGHT_TIER_LABELS",
                "at least one tier label is required".to_string(),
            ));
        }
        if self.min_reactions == 0 {
            return Err(ConfigError::InvalidValue(
                "HIGHLIGHT_MIN_REACTIONS",
                "threshold must be at least 1".to_string(),
            ));
        }
        if self.field_limit == 0 || self.max_segments == 0 {
            return Err(ConfigError::InvalidValue(
                "HIGHLIGHT_FIELD_LIMIT",
                "field limit and segment cap must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    default: fn() -> T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default()),
    }
}

// Default value functions
fn default_emblem() -> String {
    "⭐".to_string()
}

fn default_min_reactions() -> u32 {
    4
}

fn default_field_limit() -> usize {
    1024
}

fn default_max_segments() -> usize {
    6
}

fn default_tier_labels() -> Vec<String> {
    [
        "⭐ POPULAR",
        "🌟 QUALITY",
        "🥉 *THE PEOPLE HAVE SPOKEN*",
        "🥈 *INCREDIBLE*",
        "🥇 **LEGENDARY**",
        "🏆 ***GOD-TIER***",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
