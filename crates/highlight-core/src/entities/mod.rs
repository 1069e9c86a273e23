//! Entities - domain objects with identity and behavior

mod highlight;
mod message;
mod payload;

pub use highlight::{EntryState, HighlightEntry};
pub use message::{AttachmentRef, SourceMessage};
pub use payload::{PayloadSegment, PostPayload};
