//! Retry with linear back-off for the Gemini client.
//!
//! [`retry_linear`] wraps a fallible async call and retries it only when the
//! provider reports an internal server fault. Everything else (bad request,
//! auth, quota, transport failures, malformed bodies) is returned after the
//! first attempt.

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::error::ProviderError;

static INTERNAL_ERROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\binternal error\b").expect("valid internal-error regex")
});

/// How many times to call the provider and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Wait before retry `n` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts,
            backoff_step,
        }
    }

    /// Delay after `failed_attempts` consecutive failures (1-based).
    #[must_use]
    pub fn delay_after(&self, failed_attempts: u32) -> Duration {
        self.backoff_step.saturating_mul(failed_attempts)
    }
}

/// Returns `true` for provider faults worth retrying.
///
/// **Transient:**
/// - HTTP 500 responses.
/// - Error bodies whose `code` is 500 or whose `status` is `INTERNAL`.
/// - Error messages mentioning an "internal error".
///
/// **Not transient:** every other API error (400, 401, 403, 429, 503, ...),
/// transport failures, malformed bodies, bad configuration.
pub(crate) fn is_transient(err: &ProviderError) -> bool {
    match err {
        ProviderError::Api {
            status,
            code,
            api_status,
            message,
        } => {
            *status == 500
                || *code == Some(500)
                || api_status.as_deref() == Some("INTERNAL")
                || INTERNAL_ERROR.is_match(message)
        }
        ProviderError::Http(e) => {
            e.status() == Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        }
        ProviderError::Deserialize { .. }
        | ProviderError::InvalidBaseUrl { .. }
        | ProviderError::RetriesExhausted { .. } => false,
    }
}

/// Runs `operation` up to `policy.max_attempts` times.
///
/// Back-off schedule with the default policy:
///
/// | Attempt | Sleep before it |
/// |---------|-----------------|
/// | 1       | none            |
/// | 2       | 1 000 ms        |
/// | 3       | 2 000 ms        |
///
/// The sleep is a `tokio` timer, so other tasks keep running meanwhile.
///
/// # Errors
///
/// - The first non-transient error, unchanged.
/// - [`ProviderError::RetriesExhausted`] wrapping the last transient error
///   once every attempt has failed.
pub(crate) async fn retry_linear<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_transient(&err) {
            return Err(err);
        }
        if attempt >= max_attempts {
            tracing::error!(
                attempts = attempt,
                error = %err,
                "Gemini transient error persisted, giving up"
            );
            return Err(ProviderError::RetriesExhausted {
                attempts: attempt,
                source: Box::new(err),
            });
        }

        let delay = policy.delay_after(attempt);
        tracing::warn!(
            attempt,
            max_attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "Gemini internal error, retrying after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}
