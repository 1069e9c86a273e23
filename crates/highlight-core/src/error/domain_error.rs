//! Domain errors - error types for the highlight domain
//!
//! None of these are fatal: under at-least-once event delivery, duplicate
//! registrations and duplicate resolutions are expected traffic, and a
//! render overflow still produces a usable (truncated) payload.

use thiserror::Error;

use crate::value_objects::{CorrelationToken, Snowflake};

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Highlight domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A publication is already in flight for this source message
    #[error("Publication already in flight for message {0}")]
    DuplicateInFlight(Snowflake),

    /// Resolution arrived for a token that is absent or already resolved
    #[error("Unknown correlation token: {0}")]
    UnknownToken(CorrelationToken),

    /// Content needed more segments than the destination can display
    #[error("Content requires {segments} segments, max is {max}")]
    RenderOverflow { segments: usize, max: usize },
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateInFlight(_) => "DUPLICATE_IN_FLIGHT",
            Self::UnknownToken(_) => "UNKNOWN_TOKEN",
            Self::RenderOverflow { .. } => "RENDER_OVERFLOW",
        }
    }

    /// Errors that are expected races under at-least-once delivery and are
    /// absorbed as idempotent no-ops rather than surfaced
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::DuplicateInFlight(_) | Self::UnknownToken(_))
    }
}
