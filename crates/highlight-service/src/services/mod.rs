//! Highlight services

mod aggregator;
mod dispatcher;
mod filter;
mod registry;
mod renderer;

pub use aggregator::HighlightAggregator;
pub use dispatcher::{OutboundDispatcher, OutboundRequest};
pub use filter::EligibilityFilter;
pub use registry::CallbackRegistry;
pub use renderer::{PostRenderer, RenderedPost};
