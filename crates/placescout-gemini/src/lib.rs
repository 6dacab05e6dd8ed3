//! Gemini grounded-search client for placescout.
//!
//! Sends place-search prompts to the Gemini `generateContent` endpoint with
//! the Google Maps grounding tool enabled, retries transient server faults,
//! and normalizes the grounding chunks into [`placescout_core::SearchResult`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod retry;
pub mod types;

pub use client::GeminiClient;
pub use error::ProviderError;
pub use normalize::{adapt_response, NO_DETAILS_FOUND};
pub use retry::RetryPolicy;
