//! Callback registry
//!
//! Correlates outstanding publish requests with the source message that
//! triggered them. Purely an in-memory keyed table; entries lost on restart
//! are an accepted limitation.

use std::collections::HashMap;

use parking_lot::Mutex;

use highlight_core::{CorrelationToken, DomainError, DomainResult, Snowflake};

#[derive(Debug, Default)]
struct RegistryInner {
    by_token: HashMap<CorrelationToken, Snowflake>,
    // Reverse index enforcing at-most-one pending publication per message
    by_message: HashMap<Snowflake, CorrelationToken>,
}

/// Tracks in-flight publish requests by correlation token
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    inner: Mutex<RegistryInner>,
}

impl CallbackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh token and record a pending publication for the
    /// message.
    ///
    /// # Errors
    /// Returns `DuplicateInFlight` when a publication is already pending for
    /// this message; the caller must treat that as "publication already
    /// underway" and not re-request.
    pub fn register(&self, source_message_id: Snowflake) -> DomainResult<CorrelationToken> {
        let mut inner = self.inner.lock();

        if inner.by_message.contains_key(&source_message_id) {
            return Err(DomainError::DuplicateInFlight(source_message_id));
        }

        let token = CorrelationToken::new();
        inner.by_token.insert(token, source_message_id);
        inner.by_message.insert(source_message_id, token);
        Ok(token)
    }

    /// Look up and remove the pending publication for a token, returning the
    /// source message id it belonged to.
    ///
    /// # Errors
    /// Returns `UnknownToken` when the token is absent — resolved twice, or
    /// registered before a restart.
    pub fn resolve(&self, token: CorrelationToken) -> DomainResult<Snowflake> {
        let mut inner = self.inner.lock();

        let source_message_id = inner
            .by_token
            .remove(&token)
            .ok_or(DomainError::UnknownToken(token))?;
        inner.by_message.remove(&source_message_id);

        Ok(source_message_id)
    }

    /// Whether a publication is pending for the message
    pub fn has_pending(&self, source_message_id: Snowflake) -> bool {
        self.inner.lock().by_message.contains_key(&source_message_id)
    }

    /// Number of publications currently in flight
    pub fn pending_count(&self) -> usize {
        self.inner.lock().by_token.len()
    }
}
