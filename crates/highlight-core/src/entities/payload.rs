//! Post payload - abstract display value handed to the delivery collaborator
//!
//! The core never renders to a concrete wire format; the delivery layer turns
//! this into whatever the destination platform displays.

use serde::{Deserialize, Serialize};

/// Abstract highlight post content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    /// Tier label plus current score, e.g. "⭐ POPULAR | 5 reactions"
    pub title: String,
    /// Where the message came from and who wrote it
    pub attribution: String,
    /// When the source message was sent
    pub footer: String,
    /// Ordered message-content segments ("Message", then "Continued")
    pub segments: Vec<PayloadSegment>,
    /// First image attachment, surfaced as a preview
    pub preview_image: Option<String>,
    /// Permalink back to the source message
    pub link: String,
}

/// One labeled chunk of message content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSegment {
    pub label: String,
    pub text: String,
}

impl PayloadSegment {
    /// Create a new segment
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}
