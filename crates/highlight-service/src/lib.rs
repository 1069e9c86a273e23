//! # highlight-service
//!
//! Application layer for the highlights pipeline: filters the inbound
//! reaction stream, maintains per-message derived state, and drives the
//! outbound delivery port.

pub mod services;

// Re-export commonly used types at crate root
pub use services::{
    CallbackRegistry, EligibilityFilter, HighlightAggregator, OutboundDispatcher, OutboundRequest,
    PostRenderer, RenderedPost,
};
