use thiserror::Error;

/// Errors returned by the Gemini client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    ///
    /// `code` and `api_status` come from the `{"error": {...}}` body when
    /// present.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        api_status: Option<String>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Every attempt failed with a transient fault; `source` is the last one.
    #[error("Gemini API still failing after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },
}
