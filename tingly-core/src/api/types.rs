//! Wire types for the Tingly Box admin API.
//!
//! These mirror the JSON the backend produces; unknown fields are ignored and
//! optional fields default so older backends keep decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::pagination::SearchText;

/// The model-name alias the proxy answers to by default.
pub const DEFAULT_MODEL_NAME: &str = "tingly";

/// Uniform response envelope returned by every endpoint.
///
/// There is no partial-success shape: `data` is meaningful only when
/// `success` is true, and `error` only when it is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Build the failure envelope a caught transport or decode error becomes.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// The error text to surface, regardless of which field carried it.
    pub fn error_text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Which API dialect a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    #[default]
    OpenAi,
    Anthropic,
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::OpenAi => write!(f, "openai"),
            ApiStyle::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// A configured upstream provider.
///
/// `token` is write-only from the console's point of view: it is sent when
/// creating a provider but the backend never echoes it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub api_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub api_style: ApiStyle,
}

fn default_true() -> bool {
    true
}

impl SearchText for Provider {
    fn search_text(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// Fields the console may change on an existing provider.
///
/// An absent `token` leaves the stored token untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUpdate {
    pub api_base: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub api_style: ApiStyle,
}

/// Snapshot returned by `GET /api/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerStatus {
    pub server_running: bool,
    pub port: u16,
    pub providers_total: usize,
    pub providers_enabled: usize,
    pub request_count: u64,
}

/// Default request/response model mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub default_provider: String,
    pub default_model: String,
    pub default_model_name: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            default_provider: String::new(),
            default_model: String::new(),
            default_model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

/// Cached model list for one provider, keyed by provider name in the
/// `GET /api/provider-models` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderModels {
    pub models: Vec<String>,
    pub api_base: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Map of provider name to its cached models.
pub type ProviderModelMap = HashMap<String, ProviderModels>;

/// One administrative action recorded by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Access token issued for a proxy client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token: String,
}
