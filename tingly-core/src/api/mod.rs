//! Admin API client.
//!
//! This module provides:
//! - `AdminClient` - HTTP access to the UI-data and server-control surfaces
//! - The wire types both surfaces exchange, all wrapped in `ApiResponse`

mod client;
mod types;

pub use client::{AdminClient, ClientError};
pub use types::{
    ApiResponse, ApiStyle, Defaults, HistoryEntry, Provider, ProviderModelMap, ProviderModels,
    ProviderUpdate, ServerStatus, TokenGrant, DEFAULT_MODEL_NAME,
};
