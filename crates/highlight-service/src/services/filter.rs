//! Eligibility filter
//!
//! Pure predicate deciding whether a reaction event counts toward promotion.

use highlight_common::HighlightConfig;
use highlight_core::{Snowflake, SourceMessage};

/// Decides which reaction events qualify for the highlights feed
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    emblem: String,
    min_reactions: u32,
    bot_user_id: Snowflake,
}

impl EligibilityFilter {
    /// Create a new filter from config plus the bot's own identity
    pub fn new(config: &HighlightConfig, bot_user_id: Snowflake) -> Self {
        Self {
            emblem: config.emblem.clone(),
            min_reactions: config.min_reactions,
            bot_user_id,
        }
    }

    /// Check whether a reaction event should count toward promotion.
    ///
    /// Rules, in order: only the configured emblem counts; authors cannot
    /// promote their own messages; the bot's own reactions never count; the
    /// raw count must have reached the promotion threshold.
    pub fn is_qualifying(
        &self,
        reactor_id: Snowflake,
        message: &SourceMessage,
        emoji: &str,
        raw_count: u32,
    ) -> bool {
        if emoji != self.emblem {
            return false;
        }

        if reactor_id == message.author_id {
            return false;
        }

        if reactor_id == self.bot_user_id {
            return false;
        }

        if raw_count < self.min_reactions {
            return false;
        }

        true
    }
}
