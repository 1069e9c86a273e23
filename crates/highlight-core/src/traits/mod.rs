//! Ports - interfaces the domain requires from external collaborators

mod delivery;

pub use delivery::{DeliveryError, DeliveryResult, DestinationCategory, HighlightDelivery};
