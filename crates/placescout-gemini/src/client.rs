//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with Gemini-specific request construction (Google Maps
//! grounding, optional location bias), API-error decoding, and the linear
//! retry policy from [`crate::retry`].

use std::time::Duration;

use placescout_core::{AppConfig, Coordinates, PlaceSearch, SearchResult, DEFAULT_GEMINI_BASE_URL};
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::normalize::adapt_response;
use crate::retry::{retry_linear, RetryPolicy};
use crate::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GoogleMaps, LatLng,
    Part, RetrievalConfig, Tool, ToolConfig,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest raw body echoed into an error when it is not a JSON error envelope.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for Gemini grounded place search.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_GEMINI_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("placescout/0.1 (place-search)")
            .build()?;

        let model = model.trim().trim_start_matches("models/").to_owned();
        let endpoint = Self::endpoint_url(base_url, &model)?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model,
            endpoint,
            retry: RetryPolicy::default(),
        })
    }

    /// Builds a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let client = Self::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
            &config.gemini_base_url,
        )?;
        Ok(client.with_retry_policy(RetryPolicy::new(
            config.max_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        )))
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolves `{base}/v1beta/models/{model}:generateContent`.
    fn endpoint_url(base_url: &str, model: &str) -> Result<Url, ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        if model.is_empty() {
            return Err(invalid("model identifier is empty".to_owned()));
        }

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        base.join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| invalid(e.to_string()))
    }

    /// Builds the request body for one search prompt.
    ///
    /// The `toolConfig` location bias is attached only when `location` is
    /// present.
    #[must_use]
    pub fn build_request(
        request_text: &str,
        location: Option<Coordinates>,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![Part {
                    text: Some(request_text.to_owned()),
                }],
            }],
            tools: vec![Tool {
                google_maps: GoogleMaps::default(),
            }],
            tool_config: location.map(|coords| ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude: coords.latitude,
                        longitude: coords.longitude,
                    },
                },
            }),
        }
    }

    /// Sends `request`, retrying internal server faults per the retry policy.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::RetriesExhausted`] if every attempt hit an internal fault.
    /// - [`ProviderError::Api`] for any other non-2xx response.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if a 2xx body is not the expected shape.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        retry_linear(self.retry, || self.generate_once(request)).await
    }

    /// Runs a grounded place search and normalizes the answer.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::generate`].
    pub async fn search_places(
        &self,
        request_text: &str,
        location: Option<Coordinates>,
    ) -> Result<SearchResult, ProviderError> {
        let request = Self::build_request(request_text, location);
        tracing::debug!(
            model = %self.model,
            has_location = location.is_some(),
            "sending grounded place search"
        );
        let response = self.generate(&request).await?;
        let result = adapt_response(response);
        tracing::debug!(records = result.records.len(), "grounded place search done");
        Ok(result)
    }

    async fn generate_once(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
            context: format!("generateContent(model={})", self.model),
            source: e,
        })
    }

    /// Decodes a non-2xx body into [`ProviderError::Api`].
    ///
    /// Falls back to a truncated raw body when the body is not the usual
    /// `{"error": {...}}` envelope.
    fn api_error(status: reqwest::StatusCode, body: &str) -> ProviderError {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
            let error = envelope.error;
            return ProviderError::Api {
                status: status.as_u16(),
                code: error.code,
                api_status: error.status,
                message: error.message.unwrap_or_else(|| "unknown error".to_owned()),
            };
        }

        let message = if body.trim().is_empty() {
            let reason = status.canonical_reason().unwrap_or("unknown error");
            reason.to_owned()
        } else {
            body.chars().take(MAX_ERROR_BODY_CHARS).collect()
        };
        ProviderError::Api {
            status: status.as_u16(),
            code: None,
            api_status: None,
            message,
        }
    }
}

impl PlaceSearch for GeminiClient {
    type Error = ProviderError;

    async fn search(
        &self,
        request_text: &str,
        location: Option<Coordinates>,
    ) -> Result<SearchResult, ProviderError> {
        self.search_places(request_text, location).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
