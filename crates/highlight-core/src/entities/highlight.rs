//! Highlight entry - derived state for one promoted source message

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::SourceMessage;
use crate::value_objects::{PostHandle, Snowflake};

/// Lifecycle of a highlight entry.
///
/// `Tracked` is the instant between creation and the publish request going
/// out; `Publishing` means a publication is in flight; `Live` means the feed
/// post(s) exist and can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Tracked,
    Publishing,
    Live,
}

/// Derived, mutable state for a source message that crossed the promotion
/// threshold. Entries are never deleted during the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEntry {
    /// Snapshot of the promoted message, used for every render
    pub message: SourceMessage,
    /// Count of distinct qualifying reactors; always equals participants.len()
    pub score: u32,
    /// Reactors already credited toward the score (append-only while live)
    pub participants: HashSet<Snowflake>,
    /// Feed posts created for this entry, in delivery order (append-only)
    pub published_posts: Vec<PostHandle>,
    /// Lifecycle state
    pub state: EntryState,
    /// Score at the last render pushed to the feed; lets the aggregator
    /// flush deferred updates when the entry goes live
    pub rendered_score: u32,
}

impl HighlightEntry {
    /// Create a new entry for a message that just crossed the threshold,
    /// crediting the reactor whose event triggered the promotion
    pub fn new(message: SourceMessage, first_reactor: Snowflake) -> Self {
        let mut participants = HashSet::new();
        participants.insert(first_reactor);
        Self {
            message,
            score: 1,
            participants,
            published_posts: Vec::new(),
            state: EntryState::Tracked,
            rendered_score: 0,
        }
    }

    /// Credit a reactor toward the score.
    ///
    /// Returns `true` if the reactor is new; redelivered or repeated events
    /// from an already-credited reactor are no-ops, which is what keeps the
    /// score equal to the distinct reactor count under at-least-once
    /// delivery.
    pub fn credit(&mut self, reactor_id: Snowflake) -> bool {
        if self.participants.insert(reactor_id) {
            self.score += 1;
            true
        } else {
            false
        }
    }

    /// Attach the feed posts reported by the delivery collaborator and move
    /// the entry to `Live`. Handles are only ever appended.
    pub fn attach_posts(&mut self, handles: Vec<PostHandle>) {
        self.published_posts.extend(handles);
        self.state = EntryState::Live;
    }

    /// Whether the entry's feed posts exist and can be edited
    #[inline]
    pub fn is_live(&self) -> bool {
        self.state == EntryState::Live
    }

    /// Whether the feed is showing a lower score than we have recorded
    #[inline]
    pub fn display_is_stale(&self) -> bool {
        self.score > self.rendered_score
    }
}
