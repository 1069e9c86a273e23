//! Value objects - immutable identifier types

mod correlation;
mod snowflake;

pub use correlation::{CorrelationToken, PostHandle};
pub use snowflake::{Snowflake, SnowflakeParseError};
