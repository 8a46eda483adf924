//! Core types for the custom-model store.

use thiserror::Error;

/// Errors that can occur at the storage boundary.
///
/// These never escape the store's public API - writes degrade to a `false`
/// return and reads to an empty map - but the `StateStore` trait surfaces
/// them so implementations can report what went wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Payload delivered to observers after an effective mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUpdate {
    /// Provider the model belongs to.
    pub provider: String,
    /// Model name that was added or removed.
    pub model: String,
}

/// Handle returned by `CustomModelStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
