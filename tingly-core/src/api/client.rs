//! HTTP client for the two admin API surfaces.
//!
//! The UI-data surface (status, providers, models, defaults, history) and the
//! server-control surface (start/stop/restart, token issuance) may live at
//! different base addresses. Every call issues exactly one request and folds
//! transport or decode failures into the standard failure envelope; no retry,
//! no timeout enforcement, no caching.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;

use crate::config::ConsoleSettings;

use super::types::{
    ApiResponse, Defaults, HistoryEntry, Provider, ProviderModelMap, ProviderUpdate, ServerStatus,
    TokenGrant,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Client for the Tingly Box admin API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    ui_base: Url,
    server_base: Url,
}

impl AdminClient {
    /// Create a client from explicit base URLs.
    pub fn new(ui_base: &str, server_base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            ui_base: parse_base(ui_base)?,
            server_base: parse_base(server_base)?,
        })
    }

    /// Create a client from persisted console settings.
    pub fn from_settings(settings: &ConsoleSettings) -> Result<Self, ClientError> {
        Self::new(&settings.ui_api_base, &settings.server_api_base)
    }

    // =========================================================================
    // UI-data surface
    // =========================================================================

    pub async fn status(&self) -> ApiResponse<ServerStatus> {
        self.send(self.http.get(self.ui_url("api/status"))).await
    }

    pub async fn providers(&self) -> ApiResponse<Vec<Provider>> {
        self.send(self.http.get(self.ui_url("api/providers"))).await
    }

    pub async fn provider(&self, name: &str) -> ApiResponse<Provider> {
        let url = self.ui_url(&format!("api/providers/{name}"));
        self.send(self.http.get(url)).await
    }

    pub async fn add_provider(&self, provider: &Provider) -> ApiResponse<Value> {
        self.send(self.http.post(self.ui_url("api/providers")).json(provider))
            .await
    }

    pub async fn delete_provider(&self, name: &str) -> ApiResponse<Value> {
        let url = self.ui_url(&format!("api/providers/{name}"));
        self.send(self.http.delete(url)).await
    }

    pub async fn toggle_provider(&self, name: &str) -> ApiResponse<Value> {
        let url = self.ui_url(&format!("api/providers/{name}/toggle"));
        self.send(self.http.post(url)).await
    }

    pub async fn update_provider(&self, name: &str, update: &ProviderUpdate) -> ApiResponse<Value> {
        let url = self.ui_url(&format!("api/providers/{name}"));
        self.send(self.http.put(url).json(update)).await
    }

    pub async fn provider_models(&self) -> ApiResponse<ProviderModelMap> {
        self.send(self.http.get(self.ui_url("api/provider-models")))
            .await
    }

    pub async fn provider_models_for(&self, name: &str) -> ApiResponse<Vec<String>> {
        let url = self.ui_url(&format!("api/provider-models/{name}"));
        self.send(self.http.get(url)).await
    }

    pub async fn defaults(&self) -> ApiResponse<Defaults> {
        self.send(self.http.get(self.ui_url("api/defaults"))).await
    }

    pub async fn set_defaults(&self, defaults: &Defaults) -> ApiResponse<Value> {
        self.send(self.http.post(self.ui_url("api/defaults")).json(defaults))
            .await
    }

    pub async fn history(&self, limit: Option<usize>) -> ApiResponse<Vec<HistoryEntry>> {
        let mut request = self.http.get(self.ui_url("api/history"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        self.send(request).await
    }

    // =========================================================================
    // Server-control surface
    // =========================================================================

    pub async fn start_server(&self, port: u16) -> ApiResponse<Value> {
        let url = self.server_url("api/server/start");
        self.send(self.http.post(url).json(&json!({ "port": port })))
            .await
    }

    pub async fn stop_server(&self) -> ApiResponse<Value> {
        self.send(self.http.post(self.server_url("api/server/stop")))
            .await
    }

    pub async fn restart_server(&self, port: u16) -> ApiResponse<Value> {
        let url = self.server_url("api/server/restart");
        self.send(self.http.post(url).json(&json!({ "port": port })))
            .await
    }

    pub async fn generate_token(&self, client_id: &str) -> ApiResponse<TokenGrant> {
        let request = self
            .http
            .get(self.server_url("api/token"))
            .query(&[("client_id", client_id)]);
        self.send(request).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn ui_url(&self, path: &str) -> String {
        format!("{}{path}", self.ui_base)
    }

    fn server_url(&self, path: &str) -> String {
        format!("{}{path}", self.server_base)
    }

    /// Issue the request and decode the envelope.
    ///
    /// The body is parsed whatever the HTTP status - backends answer errors
    /// with a failure envelope and a non-2xx code. Transport errors and
    /// undecodable bodies become a failure envelope instead of an error.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResponse<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Admin API request failed");
                return ApiResponse::failure(e.to_string());
            }
        };

        match response.json::<ApiResponse<T>>().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode admin API response");
                ApiResponse::failure(e.to_string())
            }
        }
    }
}

/// Parse and normalize a base URL so endpoint paths can be appended directly.
fn parse_base(base: &str) -> Result<Url, ClientError> {
    let trimmed = base.trim_end_matches('/');
    Url::parse(&format!("{trimmed}/")).map_err(|source| ClientError::InvalidBaseUrl {
        url: base.to_string(),
        source,
    })
}

// =============================================================================
// Tests
// =============================================================================
