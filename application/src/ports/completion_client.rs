//! Completion client port
//!
//! One remote text-completion call against one model backend. Adapters in
//! the infrastructure layer speak the provider's wire protocol; the
//! application layer only sees "query in, text or error out".

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors a single provider call can produce
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Client for one model backend
///
/// Implementations hold their long-lived HTTP client and credentials and
/// are shared across requests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Human-readable provider label reported in outcomes, e.g. `"Llama-3 (Groq)"`
    fn provider_name(&self) -> &str;

    /// Send the query and return the raw text answer
    async fn complete(&self, query: &str) -> Result<String, ProviderError>;
}
