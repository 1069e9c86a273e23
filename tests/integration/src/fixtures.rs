//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, Ordering};

use highlight_core::{ReactionObserved, Snowflake, SourceMessage};

/// The bot's own identity in tests
pub const BOT_USER: Snowflake = Snowflake::new(999_000);

/// Counter for unique test ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Build a source message with a unique id
pub fn source_message(content: &str) -> SourceMessage {
    SourceMessage::new(
        unique_id(),
        Snowflake::new(500),
        Snowflake::new(600),
        Snowflake::new(700),
        content.to_string(),
    )
}

/// Build a star reaction event from the given reactor
pub fn star(message: &SourceMessage, reactor: i64, raw_count: u32) -> ReactionObserved {
    ReactionObserved::new(Snowflake::new(reactor), message.clone(), "⭐", raw_count)
}

/// Build a non-emblem reaction event
pub fn thumbs_up(message: &SourceMessage, reactor: i64, raw_count: u32) -> ReactionObserved {
    ReactionObserved::new(Snowflake::new(reactor), message.clone(), "👍", raw_count)
}
