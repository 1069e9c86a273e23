//! Post renderer
//!
//! Turns a (source message snapshot, current score) pair into the abstract
//! display payload the delivery layer publishes. Pure, no I/O.

use highlight_common::HighlightConfig;
use highlight_core::{DomainError, PayloadSegment, PostPayload, SourceMessage};

/// Render result: the payload plus an optional overflow report when the
/// content needed more segments than the destination can display. The
/// payload is always usable; overflow only means it was truncated.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub payload: PostPayload,
    pub overflow: Option<DomainError>,
}

/// Renders highlight posts from source messages
#[derive(Debug, Clone)]
pub struct PostRenderer {
    threshold: u32,
    field_limit: usize,
    max_segments: usize,
    tier_labels: Vec<String>,
}

impl PostRenderer {
    /// Create a new renderer from config
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            threshold: config.min_reactions,
            field_limit: config.field_limit,
            max_segments: config.max_segments,
            tier_labels: config.tier_labels.clone(),
        }
    }

    /// Tier index for a score: one step per `threshold` reactions beyond the
    /// threshold itself, clamped to the top tier. Scores below the threshold
    /// (a freshly created entry) land in tier 0.
    pub fn tier_index(&self, score: u32) -> usize {
        let steps = (score.saturating_sub(self.threshold) / self.threshold) as usize;
        steps.min(self.tier_labels.len() - 1)
    }

    /// Tier label for a score
    pub fn tier_label(&self, score: u32) -> &str {
        &self.tier_labels[self.tier_index(score)]
    }

    /// Render the display payload for a message at the given score
    pub fn render(&self, message: &SourceMessage, score: u32) -> RenderedPost {
        let plural = if score == 1 { "" } else { "s" };
        let title = format!("{} | {score} reaction{plural}", self.tier_label(score));

        let attribution = format!(
            "_Posted in <#{}>_ by <@{}>",
            message.channel_id, message.author_id
        );
        let footer = format!("Sent on {}", message.created_at.format("%m/%d/%Y"));

        let (segments, overflow) = self.content_segments(message);

        let preview_image = message
            .first_attachment()
            .filter(|a| a.is_image())
            .map(|a| a.url.clone());

        RenderedPost {
            payload: PostPayload {
                title,
                attribution,
                footer,
                segments,
                preview_image,
                link: message.jump_url(),
            },
            overflow,
        }
    }

    /// Chunk the message content into labeled segments, truncating at the
    /// segment cap
    fn content_segments(
        &self,
        message: &SourceMessage,
    ) -> (Vec<PayloadSegment>, Option<DomainError>) {
        if message.is_empty() {
            return (Vec::new(), None);
        }

        let chunks = chunk_content(&message.content, self.field_limit);
        let overflow = (chunks.len() > self.max_segments).then(|| DomainError::RenderOverflow {
            segments: chunks.len(),
            max: self.max_segments,
        });

        let segments = chunks
            .into_iter()
            .take(self.max_segments)
            .enumerate()
            .map(|(i, text)| {
                let label = if i == 0 { "Message" } else { "Continued" };
                PayloadSegment::new(label, text)
            })
            .collect();

        (segments, overflow)
    }
}

/// Split content into chunks of at most `limit` bytes, never splitting a
/// UTF-8 character. Concatenating the chunks reconstructs the input.
pub fn chunk_content(content: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        if rest.len() <= limit {
            chunks.push(rest.to_string());
            break;
        }

        let mut end = limit;
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            // limit smaller than one character; take the character whole
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        chunks.push(rest[..end].to_string());
        rest = &rest[end..];
    }

    chunks
}
