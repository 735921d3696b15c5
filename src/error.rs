//! Error types for coinwatch

use thiserror::Error;

/// Errors that can occur when fetching market records from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider returned HTTP 429
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Response body did not decode into market records
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// True for transient failures worth another attempt.
    ///
    /// Transport errors and rate limiting are retried; anything else
    /// (including a malformed body) is reported as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Network(_) | ProviderError::RateLimited)
    }
}
