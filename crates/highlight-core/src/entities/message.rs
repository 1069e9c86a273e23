//! Source message snapshot - the original message a highlight derives from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Read-only snapshot of the message that attracted reactions.
///
/// Captured at event time and never mutated afterwards; the renderer works
/// from this snapshot even if the message is later edited upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMessage {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<AttachmentRef>,
}

impl SourceMessage {
    /// Create a new SourceMessage snapshot
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            guild_id,
            channel_id,
            author_id,
            content,
            created_at: Utc::now(),
            attachments: Vec::new(),
        }
    }

    /// Attach a reference to an uploaded file
    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// First attachment, if any (the only one a highlight post surfaces)
    pub fn first_attachment(&self) -> Option<&AttachmentRef> {
        self.attachments.first()
    }

    /// Permalink to the message on the platform
    pub fn jump_url(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.channel_id, self.id
        )
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Reference to a message attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub url: String,
    pub filename: String,
}

impl AttachmentRef {
    /// Create a new AttachmentRef
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }

    /// Check if the attachment looks like an image
    pub fn is_image(&self) -> bool {
        let name = self.filename.to_ascii_lowercase();
        [".png", ".jpg", ".jpeg", ".gif", ".webp"]
            .iter()
            .any(|ext| name.ends_with(ext))
    }
}
