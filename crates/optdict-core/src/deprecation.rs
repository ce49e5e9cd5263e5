//! Where deprecation notices go.

use std::sync::{Arc, Mutex, PoisonError};

/// Receiver for one-shot deprecation notices.
pub trait DeprecationSink: Send + Sync {
    fn deprecated(&self, option: &str, message: &str);
}

/// Emits notices as `tracing` warnings under the `optdict::deprecation` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DeprecationSink for TracingSink {
    fn deprecated(&self, option: &str, message: &str) {
        tracing::warn!(target: "optdict::deprecation", option, "{message}");
    }
}

/// Keeps every notice in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeprecationSink for CollectingSink {
    fn deprecated(&self, _option: &str, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
