//! Model provider clients
//!
//! Each client implements [`CompletionClient`] for one wire protocol.
//! [`build_adapters`] turns the `[providers]` config section into the
//! ordered list of [`ProviderAdapter`]s the ensemble fans out to.

pub mod gemini;
pub mod openai_compat;

pub use gemini::GeminiClient;
pub use openai_compat::OpenAiCompatibleClient;

use crate::config::FileConfig;
use ensemble_application::{CompletionClient, GuardedAdapter, ProviderAdapter, ProviderError};
use reqwest::StatusCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Longest slice of an error body carried into an outcome message
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderSetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "gemini" => Ok(ProviderKind::Gemini),
            _ => Err(ProviderSetupError::UnknownProvider(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderSetupError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("No providers enabled")]
    NoProviders,
}

/// Map a non-2xx HTTP status to the matching [`ProviderError`].
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = format!("HTTP {}: {}", status.as_u16(), truncate(body.trim()));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(detail),
        _ => ProviderError::Provider(detail),
    }
}

/// Transport failure without the request URL, which may carry credentials.
pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    ProviderError::Network(error.without_url().to_string())
}

fn truncate(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Build one adapter per entry of `providers.enabled`, in order.
///
/// A provider without an API key is still built: its calls fail with an
/// authentication outcome instead of aborting startup.
pub fn build_adapters(
    config: &FileConfig,
    http: reqwest::Client,
) -> Result<Vec<Arc<dyn ProviderAdapter>>, ProviderSetupError> {
    if config.providers.enabled.is_empty() {
        return Err(ProviderSetupError::NoProviders);
    }

    let default_timeout = Duration::from_secs(config.ensemble.provider_timeout_secs);
    let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    for name in &config.providers.enabled {
        let kind: ProviderKind = name.parse()?;
        let (client, timeout_secs): (Arc<dyn CompletionClient>, Option<u64>) = match kind {
            ProviderKind::Groq => {
                let groq = &config.providers.groq;
                let api_key = groq.resolve_api_key();
                if api_key.is_none() {
                    warn!(
                        "No API key for groq (set {}); its calls will fail",
                        groq.api_key_env
                    );
                }
                let client = OpenAiCompatibleClient::new(
                    http.clone(),
                    &groq.base_url,
                    api_key,
                    &groq.model,
                    &groq.display_name,
                )
                .with_temperature(groq.temperature);
                (Arc::new(client), groq.timeout_secs)
            }
            ProviderKind::Gemini => {
                let gemini = &config.providers.gemini;
                let api_key = gemini.resolve_api_key();
                if api_key.is_none() {
                    warn!(
                        "No API key for gemini (set {}); its calls will fail",
                        gemini.api_key_env
                    );
                }
                let client = GeminiClient::new(
                    http.clone(),
                    &gemini.base_url,
                    api_key,
                    &gemini.model,
                    &gemini.display_name,
                );
                (Arc::new(client), gemini.timeout_secs)
            }
        };

        let timeout = timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(default_timeout);
        info!(
            "Provider {} ({}) enabled, timeout {:?}",
            client.provider_name(),
            kind,
            timeout
        );
        adapters.push(Arc::new(GuardedAdapter::new(client).with_timeout(timeout)));
    }

    Ok(adapters)
}
