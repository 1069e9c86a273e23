//! Domain events consumed by the highlight aggregator

mod highlight_event;

pub use highlight_event::{HighlightEvent, PublicationResolved, ReactionObserved};
