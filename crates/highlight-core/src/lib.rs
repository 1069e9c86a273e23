//! # highlight-core
//!
//! Domain layer containing entities, value objects, domain events, and the
//! delivery port traits. This crate has zero dependencies on infrastructure
//! (runtime, delivery transport, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AttachmentRef, EntryState, HighlightEntry, PayloadSegment, PostPayload, SourceMessage,
};
pub use error::{DomainError, DomainResult};
pub use events::{HighlightEvent, PublicationResolved, ReactionObserved};
pub use traits::{DeliveryError, DeliveryResult, DestinationCategory, HighlightDelivery};
pub use value_objects::{CorrelationToken, PostHandle, Snowflake, SnowflakeParseError};
