//! Delivery port - the outbound boundary to the messaging layer
//!
//! The core does not know how many destination channels a category fans out
//! to or how posts are rendered on the wire; it hands over an abstract
//! payload and a correlation token, and later receives back opaque post
//! handles via a `PublicationResolved` event.

use async_trait::async_trait;

use crate::entities::PostPayload;
use crate::value_objects::{CorrelationToken, PostHandle, Snowflake};

/// Result type for delivery operations
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Designated destination feeds a guild can configure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationCategory {
    /// The promoted-messages feed
    Highlights,
}

impl DestinationCategory {
    /// Get the category name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Highlights => "highlights",
        }
    }
}

/// Outbound delivery collaborator.
///
/// Both calls are fire-and-forget from the aggregator's perspective: a
/// publish is answered asynchronously through the event stream, an edit is
/// never answered at all. Delivery failures are the collaborator's concern;
/// from here they just mean the resolution event never arrives.
#[async_trait]
pub trait HighlightDelivery: Send + Sync {
    /// Request a new post in the designated feed of the given guild
    async fn request_publish(
        &self,
        category: DestinationCategory,
        guild_id: Snowflake,
        payload: PostPayload,
        token: CorrelationToken,
    ) -> DeliveryResult<()>;

    /// Request an in-place edit of a previously published post
    async fn request_edit(&self, handle: PostHandle, payload: PostPayload) -> DeliveryResult<()>;
}

/// Errors the delivery collaborator may report synchronously
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Delivery channel unavailable: {0}")]
    Unavailable(String),
}
