//! Highlight aggregator
//!
//! Owns all mutable derived state for promoted messages and drives the
//! eligibility filter, renderer, and callback registry. Per-message state
//! lives in a sharded map; two events on the same source message serialize
//! on its shard entry, while unrelated messages proceed independently. No
//! awaits happen under an entry guard — outbound work is enqueued on an
//! unbounded channel and dispatched after the guard is released.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

use highlight_common::HighlightConfig;
use highlight_core::{
    DestinationCategory, DomainError, EntryState, HighlightEntry, HighlightEvent,
    PublicationResolved, ReactionObserved, Snowflake,
};

use super::dispatcher::OutboundRequest;
use super::filter::EligibilityFilter;
use super::registry::CallbackRegistry;
use super::renderer::{PostRenderer, RenderedPost};

/// Maintains the highlights feed from the live reaction stream
pub struct HighlightAggregator {
    entries: DashMap<Snowflake, HighlightEntry>,
    registry: CallbackRegistry,
    filter: EligibilityFilter,
    renderer: PostRenderer,
    outbound: mpsc::UnboundedSender<OutboundRequest>,
}

impl HighlightAggregator {
    /// Create a new aggregator writing outbound requests to the given queue
    pub fn new(
        config: &HighlightConfig,
        bot_user_id: Snowflake,
        outbound: mpsc::UnboundedSender<OutboundRequest>,
    ) -> Self {
        Self {
            entries: DashMap::new(),
            registry: CallbackRegistry::new(),
            filter: EligibilityFilter::new(config, bot_user_id),
            renderer: PostRenderer::new(config),
            outbound,
        }
    }

    /// Spawn the event loop consuming the inbound stream. This is the
    /// subscription seam for the external event bus; the loop ends when the
    /// sender side is dropped.
    pub fn start(
        self: &Arc<Self>,
        events: mpsc::UnboundedReceiver<HighlightEvent>,
    ) -> JoinHandle<()> {
        let aggregator = Arc::clone(self);
        tokio::spawn(async move {
            aggregator.run(events).await;
        })
    }

    async fn run(&self, mut events: mpsc::UnboundedReceiver<HighlightEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                HighlightEvent::ReactionObserved(e) => self.handle_reaction(&e),
                HighlightEvent::PublicationResolved(e) => self.handle_resolution(e),
            }
        }
        info!("Highlight event stream closed");
    }

    /// Process one observed reaction. Single entry point for all state
    /// transitions; idempotent under redelivery.
    #[instrument(
        skip(self, event),
        fields(message_id = %event.message.id, reactor_id = %event.reactor_id)
    )]
    pub fn handle_reaction(&self, event: &ReactionObserved) {
        if !self.filter.is_qualifying(
            event.reactor_id,
            &event.message,
            &event.emoji,
            event.raw_count,
        ) {
            trace!(emoji = %event.emoji, raw_count = event.raw_count, "Reaction not qualifying");
            return;
        }

        match self.entries.entry(event.message.id) {
            Entry::Occupied(mut occupied) => {
                self.record_reaction(occupied.get_mut(), event.reactor_id);
            }
            Entry::Vacant(vacant) => {
                let mut entry =
                    vacant.insert(HighlightEntry::new(event.message.clone(), event.reactor_id));
                self.promote(&mut entry);
            }
        }
    }

    /// Process the delivery layer's report of a finished publication
    #[instrument(skip(self, event), fields(token = %event.token))]
    pub fn handle_resolution(&self, event: PublicationResolved) {
        let message_id = match self.registry.resolve(event.token) {
            Ok(id) => id,
            Err(err) => {
                // duplicate notifications are expected under at-least-once
                // delivery; log and drop
                warn!(code = err.code(), "Dropping publication resolution");
                return;
            }
        };

        let Some(mut entry) = self.entries.get_mut(&message_id) else {
            warn!(message_id = %message_id, "Resolved token for untracked message");
            return;
        };

        entry.attach_posts(event.post_handles);
        info!(
            message_id = %message_id,
            posts = entry.published_posts.len(),
            score = entry.score,
            "Highlight live"
        );

        // flush score changes that were deferred while publishing
        if entry.display_is_stale() {
            self.push_edits(&mut entry);
        }
    }

    /// First qualifying reaction for a message: create the entry and request
    /// publication
    fn promote(&self, entry: &mut HighlightEntry) {
        let message_id = entry.message.id;

        match self.registry.register(message_id) {
            Ok(token) => {
                let rendered = self.render_checked(entry);
                entry.state = EntryState::Publishing;
                entry.rendered_score = entry.score;

                self.enqueue(OutboundRequest::Publish {
                    category: DestinationCategory::Highlights,
                    guild_id: entry.message.guild_id,
                    payload: rendered.payload,
                    token,
                });

                info!(message_id = %message_id, token = %token, "Highlight promotion requested");
            }
            Err(err) => {
                // tolerated race: another event already started publication
                debug!(code = err.code(), "Publication already underway");
            }
        }
    }

    /// Subsequent qualifying reaction on an existing entry
    fn record_reaction(&self, entry: &mut HighlightEntry, reactor_id: Snowflake) {
        if !entry.credit(reactor_id) {
            trace!("Reactor already credited");
            return;
        }

        debug!(score = entry.score, state = ?entry.state, "Score advanced");

        // while a publication is in flight the score is recorded but edits
        // wait for the entry to go live
        if entry.is_live() {
            self.push_edits(entry);
        }
    }

    /// Re-render and request an in-place edit of every published post, in
    /// sequence order
    fn push_edits(&self, entry: &mut HighlightEntry) {
        let rendered = self.render_checked(entry);
        entry.rendered_score = entry.score;

        for handle in &entry.published_posts {
            self.enqueue(OutboundRequest::Edit {
                handle: *handle,
                payload: rendered.payload.clone(),
            });
        }
    }

    fn render_checked(&self, entry: &HighlightEntry) -> RenderedPost {
        let rendered = self.renderer.render(&entry.message, entry.score);
        if let Some(DomainError::RenderOverflow { segments, max }) = rendered.overflow {
            warn!(
                message_id = %entry.message.id,
                segments,
                max,
                "Highlight content truncated"
            );
        }
        rendered
    }

    fn enqueue(&self, request: OutboundRequest) {
        // send only fails when the dispatcher is gone, i.e. at shutdown
        if self.outbound.send(request).is_err() {
            warn!("Outbound queue closed, dropping request");
        }
    }

    /// Snapshot of the entry for a message, if it was ever promoted
    pub fn entry(&self, message_id: Snowflake) -> Option<HighlightEntry> {
        self.entries.get(&message_id).map(|e| e.value().clone())
    }

    /// Number of messages promoted during this process lifetime
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether a publication is currently in flight for the message
    pub fn has_pending_publication(&self, message_id: Snowflake) -> bool {
        self.registry.has_pending(message_id)
    }
}
