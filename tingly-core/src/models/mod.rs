//! Custom model storage.
//!
//! This module provides:
//! - `StateStore` - Injected key-value storage trait
//! - `CustomModelStore` - Durable per-provider list of operator-added models
//! - `ModelUpdate` - Change notification payload for subscribed observers

mod store;
mod types;

pub use store::{CustomModelStore, MemoryStore, StateStore, CUSTOM_MODELS_STATE_KEY};
pub use types::{ModelUpdate, StoreError, SubscriptionId};
