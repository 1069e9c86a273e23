//! Events driving the highlight pipeline
//!
//! Both arrive from external collaborators: reactions from the messaging
//! layer's event bus, resolutions from the delivery layer. Delivery is
//! at-least-once and unordered across distinct source messages; handlers
//! must tolerate redelivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::SourceMessage;
use crate::value_objects::{CorrelationToken, PostHandle, Snowflake};

/// All events the aggregator consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightEvent {
    ReactionObserved(ReactionObserved),
    PublicationResolved(PublicationResolved),
}

impl HighlightEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionObserved(_) => "REACTION_OBSERVED",
            Self::PublicationResolved(_) => "PUBLICATION_RESOLVED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionObserved(e) => e.timestamp,
            Self::PublicationResolved(e) => e.timestamp,
        }
    }
}

/// A reaction count changed on a user message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionObserved {
    pub reactor_id: Snowflake,
    pub message: SourceMessage,
    pub emoji: String,
    /// Platform-reported reaction count at delivery time. Distinct from the
    /// entry score: this is the raw count including non-qualifying reactors.
    pub raw_count: u32,
    pub timestamp: DateTime<Utc>,
}

impl ReactionObserved {
    pub fn new(
        reactor_id: Snowflake,
        message: SourceMessage,
        emoji: impl Into<String>,
        raw_count: u32,
    ) -> Self {
        Self {
            reactor_id,
            message,
            emoji: emoji.into(),
            raw_count,
            timestamp: Utc::now(),
        }
    }
}

/// The delivery collaborator finished a publish request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationResolved {
    pub token: CorrelationToken,
    pub post_handles: Vec<PostHandle>,
    pub timestamp: DateTime<Utc>,
}

impl PublicationResolved {
    pub fn new(token: CorrelationToken, post_handles: Vec<PostHandle>) -> Self {
        Self {
            token,
            post_handles,
            timestamp: Utc::now(),
        }
    }
}
