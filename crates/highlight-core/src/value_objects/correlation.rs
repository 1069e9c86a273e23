//! Correlation token and post handle - opaque references across the
//! delivery boundary

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Snowflake;

/// Opaque token linking an outbound publish request to its eventual
/// asynchronous resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationToken(Uuid);

impl CorrelationToken {
    /// Allocate a fresh unique token
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CorrelationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a previously published highlight post, used to
/// target later in-place edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostHandle {
    /// Channel the post was delivered to
    pub channel_id: Snowflake,
    /// The delivered post itself
    pub post_id: Snowflake,
}

impl PostHandle {
    /// Create a new PostHandle
    pub const fn new(channel_id: Snowflake, post_id: Snowflake) -> Self {
        Self {
            channel_id,
            post_id,
        }
    }
}

impl fmt::Display for PostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel_id, self.post_id)
    }
}
