//! Tingly Core Library
//!
//! This crate provides the client-side logic for Tingly Console, the
//! administrative console for the Tingly Box AI proxy. It includes:
//!
//! - Admin API client for the UI-data and server-control surfaces
//! - Durable custom-model store with change notification
//! - Pagination and search filtering for per-provider model lists
//! - Responsive grid-layout calculation for card displays
//! - Console settings and SQLite-backed local persistence
//! - History statistics, filtering, and export

pub mod api;
pub mod config;
pub mod db;
pub mod history;
pub mod layout;
pub mod models;
pub mod pagination;

// Re-exports for convenience
pub use api::{
    AdminClient, ApiResponse, ApiStyle, Defaults, HistoryEntry, Provider, ProviderModelMap,
    ProviderModels, ProviderUpdate, ServerStatus, TokenGrant,
};
pub use config::ConsoleSettings;
pub use db::Database;
pub use history::{HistoryFilter, HistoryStats};
pub use layout::{grid_layout, GridLayout, Viewport};
pub use models::{CustomModelStore, MemoryStore, ModelUpdate, StateStore, SubscriptionId};
pub use pagination::{Page, Paginator, SearchText};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn exports_are_accessible() {
        // Verify all public types are accessible
        fn _check_types(
            _db: &Database,
            _settings: &ConsoleSettings,
            _client: &AdminClient,
            _store: &CustomModelStore<MemoryStore>,
            _paginator: &Paginator,
            _layout: GridLayout,
            _stats: &HistoryStats,
        ) {
        }
    }
}
