//! Outbound dispatcher
//!
//! Single sequential consumer of the outbound queue. The aggregator enqueues
//! while holding per-message state locks; a lone consumer means publish and
//! edit requests reach the delivery collaborator in exactly the order the
//! triggering events were processed, so a stale score can never overwrite a
//! newer one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use highlight_core::{
    CorrelationToken, DestinationCategory, HighlightDelivery, PostHandle, PostPayload, Snowflake,
};

/// A unit of outbound work for the delivery collaborator
#[derive(Debug, Clone)]
pub enum OutboundRequest {
    /// Publish a new highlight post to a designated feed
    Publish {
        category: DestinationCategory,
        guild_id: Snowflake,
        payload: PostPayload,
        token: CorrelationToken,
    },
    /// Edit a previously published post in place
    Edit {
        handle: PostHandle,
        payload: PostPayload,
    },
}

/// Routes outbound requests to the delivery port
pub struct OutboundDispatcher {
    delivery: Arc<dyn HighlightDelivery>,
}

impl OutboundDispatcher {
    /// Create a new dispatcher over a delivery collaborator
    pub fn new(delivery: Arc<dyn HighlightDelivery>) -> Self {
        Self { delivery }
    }

    /// Spawn the dispatch loop. The loop ends when every sender for the
    /// queue has been dropped; the returned handle completes then.
    pub fn start(self, requests: mpsc::UnboundedReceiver<OutboundRequest>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run(requests).await;
        })
    }

    /// Run the dispatch loop to completion
    pub async fn run(&self, mut requests: mpsc::UnboundedReceiver<OutboundRequest>) {
        while let Some(request) = requests.recv().await {
            self.dispatch(request).await;
        }
        trace!("Outbound queue closed, dispatcher stopping");
    }

    async fn dispatch(&self, request: OutboundRequest) {
        match request {
            OutboundRequest::Publish {
                category,
                guild_id,
                payload,
                token,
            } => {
                trace!(
                    category = category.name(),
                    guild_id = %guild_id,
                    token = %token,
                    "Dispatching publish request"
                );
                if let Err(err) = self
                    .delivery
                    .request_publish(category, guild_id, payload, token)
                    .await
                {
                    // delivery failures mean the resolution event never
                    // arrives; nothing to unwind here
                    warn!(token = %token, error = %err, "Publish request failed");
                }
            }
            OutboundRequest::Edit { handle, payload } => {
                trace!(handle = %handle, "Dispatching edit request");
                if let Err(err) = self.delivery.request_edit(handle, payload).await {
                    warn!(handle = %handle, error = %err, "Edit request failed");
                }
            }
        }
    }
}
