//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod cache;
mod ensemble;
mod providers;
mod server;

pub use cache::{CacheBackend, FileCacheConfig};
pub use ensemble::FileEnsembleConfig;
pub use providers::{FileGeminiConfig, FileGroqConfig, FileProvidersConfig, KNOWN_PROVIDERS};
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found while validating a loaded configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroDuration { field: String },

    #[error("providers.enabled is empty; at least one provider is required")]
    NoProvidersEnabled,

    #[error("providers.enabled: unknown provider '{0}' (expected one of: groq, gemini)")]
    UnknownProvider(String),

    #[error("providers.enabled: '{0}' is listed more than once")]
    DuplicateProvider(String),

    #[error("cache.backend: {0}")]
    InvalidCacheBackend(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fan-out and caching parameters
    pub ensemble: FileEnsembleConfig,
    /// Cache backend settings
    pub cache: FileCacheConfig,
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Provider credentials and models
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let zero_checks = [
            ("ensemble.provider_timeout_secs", Some(self.ensemble.provider_timeout_secs)),
            ("ensemble.cache_ttl_secs", Some(self.ensemble.cache_ttl_secs)),
            ("cache.connect_timeout_secs", Some(self.cache.connect_timeout_secs)),
            ("providers.groq.timeout_secs", self.providers.groq.timeout_secs),
            ("providers.gemini.timeout_secs", self.providers.gemini.timeout_secs),
        ];
        for (field, value) in zero_checks {
            if value == Some(0) {
                issues.push(ConfigValidationError::ZeroDuration {
                    field: field.to_string(),
                });
            }
        }

        if self.providers.enabled.is_empty() {
            issues.push(ConfigValidationError::NoProvidersEnabled);
        }

        let mut seen = Vec::new();
        for name in &self.providers.enabled {
            let normalized = name.trim().to_lowercase();
            if !KNOWN_PROVIDERS.contains(&normalized.as_str()) {
                issues.push(ConfigValidationError::UnknownProvider(name.clone()));
            } else if seen.contains(&normalized) {
                issues.push(ConfigValidationError::DuplicateProvider(name.clone()));
            } else {
                seen.push(normalized);
            }
        }

        if let Err(reason) = self.cache.parse_backend() {
            issues.push(ConfigValidationError::InvalidCacheBackend(reason));
        }

        issues
    }
}
