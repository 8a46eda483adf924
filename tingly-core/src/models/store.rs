//! Durable, per-provider store of operator-added model names.
//!
//! Custom models are model identifiers the operator typed in by hand, as
//! opposed to models fetched from a provider's own listing endpoint. They are
//! persisted as a single JSON blob (provider name -> list of model names)
//! behind an injected [`StateStore`], and mirrored in memory for the lifetime
//! of the store. Other parts of the console learn about changes through a
//! synchronous observer registry owned by the store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::types::{ModelUpdate, StoreError, SubscriptionId};

/// Default key the custom-models blob is persisted under.
pub const CUSTOM_MODELS_STATE_KEY: &str = "tingly_custom_models";

/// Key-value storage the store persists through.
///
/// Reads and writes are synchronous and non-transactional; one blob is one
/// value. `Database` implements this over the `ui_state` table, and
/// [`MemoryStore`] provides a storage-free implementation for tests.
pub trait StateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory `StateStore` implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

type Listener = Box<dyn Fn(&ModelUpdate) + Send>;

/// Store of custom model names, keyed by provider.
///
/// Mutations rewrite the whole persisted blob. Storage failures never reach
/// the caller as errors: writes report `false`, reads degrade to an empty
/// map. Observers registered via [`subscribe`](Self::subscribe) are invoked
/// synchronously after every effective mutation.
pub struct CustomModelStore<S> {
    storage: S,
    state_key: String,
    models: HashMap<String, Vec<String>>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: StateStore> CustomModelStore<S> {
    /// Create a store over `storage` using the default state key.
    pub fn new(storage: S) -> Self {
        Self::with_state_key(storage, CUSTOM_MODELS_STATE_KEY)
    }

    /// Create a store persisting under a caller-chosen state key.
    ///
    /// Separate keys give fully independent stores, which is what tests and
    /// multi-profile setups want.
    pub fn with_state_key(storage: S, state_key: impl Into<String>) -> Self {
        let state_key = state_key.into();
        let models = load_blob(&storage, &state_key);
        Self {
            storage,
            state_key,
            models,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Re-read the persisted blob, replacing the in-memory mirror.
    pub fn reload(&mut self) {
        self.models = load_blob(&self.storage, &self.state_key);
    }

    /// All custom models, keyed by provider name.
    pub fn all(&self) -> &HashMap<String, Vec<String>> {
        &self.models
    }

    /// Custom models for one provider, in insertion order.
    pub fn models_for(&self, provider: &str) -> &[String] {
        self.models.get(provider).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `model` is a custom model of `provider`.
    pub fn is_custom_model(&self, model: &str, provider: &str) -> bool {
        self.models_for(provider).iter().any(|m| m == model)
    }

    /// Add `model` to `provider`'s list.
    ///
    /// Empty or whitespace-only names are ignored and report `false`.
    /// A duplicate (case-sensitive) is a successful no-op. Returns `false`
    /// only when the storage write fails.
    pub fn save_model(&mut self, provider: &str, model: &str) -> bool {
        if model.trim().is_empty() {
            return false;
        }
        if self.is_custom_model(model, provider) {
            return true;
        }

        let mut next = self.models.clone();
        next.entry(provider.to_string())
            .or_default()
            .push(model.to_string());

        if !self.persist(&next) {
            return false;
        }
        self.models = next;
        tracing::debug!(provider, model, "Saved custom model");
        self.notify(provider, model);
        true
    }

    /// Remove `model` from `provider`'s list.
    ///
    /// When the last model of a provider is removed, the provider's entry is
    /// dropped from the blob entirely. Removing something that isn't there is
    /// a successful no-op. Returns `false` only when the storage write fails.
    pub fn remove_model(&mut self, provider: &str, model: &str) -> bool {
        if !self.is_custom_model(model, provider) {
            return true;
        }

        let mut next = self.models.clone();
        if let Some(list) = next.get_mut(provider) {
            list.retain(|m| m != model);
            if list.is_empty() {
                next.remove(provider);
            }
        }

        if !self.persist(&next) {
            return false;
        }
        self.models = next;
        tracing::debug!(provider, model, "Removed custom model");
        self.notify(provider, model);
        true
    }

    /// Register an observer called after every effective mutation.
    ///
    /// Delivery is synchronous and best-effort: no queuing, no replay for
    /// late subscribers.
    pub fn subscribe(&mut self, listener: impl Fn(&ModelUpdate) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    fn notify(&self, provider: &str, model: &str) {
        let update = ModelUpdate {
            provider: provider.to_string(),
            model: model.to_string(),
        };
        for (_, listener) in &self.listeners {
            listener(&update);
        }
    }

    fn persist(&self, models: &HashMap<String, Vec<String>>) -> bool {
        let result = if models.is_empty() {
            self.storage.remove(&self.state_key)
        } else {
            match serde_json::to_string(models) {
                Ok(json) => self.storage.set(&self.state_key, &json),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to serialize custom models");
                    return false;
                }
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to persist custom models");
                false
            }
        }
    }
}

/// Read and decode the persisted blob. Fails soft: any read or parse problem
/// logs a warning and yields an empty map.
///
/// Legacy blobs stored a single string per provider; a scalar is promoted to
/// a one-element list on load.
fn load_blob<S: StateStore>(storage: &S, state_key: &str) -> HashMap<String, Vec<String>> {
    let raw = match storage.get(state_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HashMap::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read custom models from storage");
            return HashMap::new();
        }
    };

    let parsed: serde_json::Map<String, Value> = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse custom models blob");
            return HashMap::new();
        }
    };

    let mut models = HashMap::new();
    for (provider, value) in parsed {
        match value {
            Value::String(model) if !model.is_empty() => {
                models.insert(provider, vec![model]);
            }
            Value::String(_) => {}
            Value::Array(entries) => {
                let list: Vec<String> = entries
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect();
                if !list.is_empty() {
                    models.insert(provider, list);
                }
            }
            other => {
                tracing::warn!(provider = %provider, value = %other, "Dropping malformed custom-models entry");
            }
        }
    }
    models
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// StateStore double whose writes always fail.
    struct FailingStore;

    impl StateStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Storage("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_save_model_appears_exactly_once() {
        let mut store = CustomModelStore::new(MemoryStore::new());

        assert!(store.save_model("openai", "gpt-4o-mini"));
        assert!(store.save_model("openai", "gpt-4o-mini"));

        assert_eq!(store.models_for("openai"), ["gpt-4o-mini"]);
    }

    #[test]
    fn test_save_model_rejects_blank_names() {
        let mut store = CustomModelStore::new(MemoryStore::new());

        assert!(!store.save_model("openai", ""));
        assert!(!store.save_model("openai", "   "));
        assert!(store.models_for("openai").is_empty());
    }

    #[test]
    fn test_save_model_preserves_insertion_order() {
        let mut store = CustomModelStore::new(MemoryStore::new());

        store.save_model("openai", "gpt-4o");
        store.save_model("openai", "gpt-4o-mini");
        store.save_model("openai", "o3");

        assert_eq!(store.models_for("openai"), ["gpt-4o", "gpt-4o-mini", "o3"]);
    }

    #[test]
    fn test_remove_last_model_drops_provider_from_blob() {
        let storage = MemoryStore::new();
        let mut store = CustomModelStore::new(&storage);

        store.save_model("openai", "gpt-4o");
        store.save_model("anthropic", "claude-3-haiku");
        assert!(store.remove_model("openai", "gpt-4o"));

        assert!(store.models_for("openai").is_empty());
        let raw = storage.get(CUSTOM_MODELS_STATE_KEY).unwrap().unwrap();
        let blob: serde_json::Map<String, Value> = serde_json::from_str(&raw).unwrap();
        assert!(!blob.contains_key("openai"));
        assert!(blob.contains_key("anthropic"));
    }

    #[test]
    fn test_removing_everything_clears_storage() {
        let storage = MemoryStore::new();
        let mut store = CustomModelStore::new(&storage);

        store.save_model("openai", "gpt-4o");
        store.remove_model("openai", "gpt-4o");

        assert_eq!(storage.get(CUSTOM_MODELS_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_missing_model_is_noop_success() {
        let mut store = CustomModelStore::new(MemoryStore::new());

        assert!(store.remove_model("openai", "gpt-4o"));
    }

    #[test]
    fn test_legacy_scalar_promoted_to_list() {
        let storage = MemoryStore::new();
        storage
            .set(CUSTOM_MODELS_STATE_KEY, r#"{"openai": "gpt-4"}"#)
            .unwrap();

        let store = CustomModelStore::new(&storage);
        assert_eq!(store.models_for("openai"), ["gpt-4"]);
    }

    #[test]
    fn test_corrupted_blob_loads_empty() {
        let storage = MemoryStore::new();
        storage.set(CUSTOM_MODELS_STATE_KEY, "not json {").unwrap();

        let store = CustomModelStore::new(&storage);
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_dropped() {
        let storage = MemoryStore::new();
        storage
            .set(
                CUSTOM_MODELS_STATE_KEY,
                r#"{"openai": 42, "anthropic": ["claude-3-haiku", 7]}"#,
            )
            .unwrap();

        let store = CustomModelStore::new(&storage);
        assert!(store.models_for("openai").is_empty());
        assert_eq!(store.models_for("anthropic"), ["claude-3-haiku"]);
    }

    #[test]
    fn test_is_custom_model_is_case_sensitive() {
        let mut store = CustomModelStore::new(MemoryStore::new());

        store.save_model("openai", "gpt-4o");
        assert!(store.is_custom_model("gpt-4o", "openai"));
        assert!(!store.is_custom_model("GPT-4o", "openai"));
        assert!(!store.is_custom_model("gpt-4o", "anthropic"));
    }

    #[test]
    fn test_storage_write_failure_reports_false_and_keeps_mirror() {
        let mut store = CustomModelStore::new(FailingStore);

        assert!(!store.save_model("openai", "gpt-4o"));
        assert!(store.models_for("openai").is_empty());
    }

    #[test]
    fn test_observers_fire_on_save_and_remove() {
        let seen: Arc<Mutex<Vec<ModelUpdate>>> = Arc::new(Mutex::new(Vec::new()));
        let mut store = CustomModelStore::new(MemoryStore::new());

        let sink = Arc::clone(&seen);
        store.subscribe(move |update| sink.lock().unwrap().push(update.clone()));

        store.save_model("openai", "gpt-4o");
        store.remove_model("openai", "gpt-4o");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            ModelUpdate {
                provider: "openai".to_string(),
                model: "gpt-4o".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_save_does_not_notify() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut store = CustomModelStore::new(MemoryStore::new());

        let count = Arc::clone(&fired);
        store.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        store.save_model("openai", "gpt-4o");
        store.save_model("openai", "gpt-4o");

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribed_observer_stops_receiving() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut store = CustomModelStore::new(MemoryStore::new());

        let count = Arc::clone(&fired);
        let id = store.subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });

        store.save_model("openai", "gpt-4o");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.save_model("openai", "o3");

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_observers_all_fire() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut store = CustomModelStore::new(MemoryStore::new());

        for _ in 0..3 {
            let count = Arc::clone(&fired);
            store.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        store.save_model("openai", "gpt-4o");
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_separate_state_keys_are_independent() {
        let storage = MemoryStore::new();

        let mut first = CustomModelStore::with_state_key(&storage, "profile_a");
        let mut second = CustomModelStore::with_state_key(&storage, "profile_b");

        first.save_model("openai", "gpt-4o");
        second.save_model("openai", "o3");

        assert_eq!(first.models_for("openai"), ["gpt-4o"]);
        assert_eq!(second.models_for("openai"), ["o3"]);
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let storage = MemoryStore::new();
        let mut store = CustomModelStore::new(&storage);

        storage
            .set(CUSTOM_MODELS_STATE_KEY, r#"{"openai": ["gpt-4o"]}"#)
            .unwrap();
        assert!(store.models_for("openai").is_empty());

        store.reload();
        assert_eq!(store.models_for("openai"), ["gpt-4o"]);
    }
}
