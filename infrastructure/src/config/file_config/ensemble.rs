//! Ensemble configuration from TOML (`[ensemble]` section)

use ensemble_application::EnsembleParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw ensemble configuration from TOML
///
/// # Example
///
/// ```toml
/// [ensemble]
/// provider_timeout_secs = 30
/// cache_ttl_secs = 3600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnsembleConfig {
    /// Timeout for providers without their own `timeout_secs`
    pub provider_timeout_secs: u64,
    /// Lifetime of cached aggregated responses
    pub cache_ttl_secs: u64,
}

impl Default for FileEnsembleConfig {
    fn default() -> Self {
        let params = EnsembleParams::default();
        Self {
            provider_timeout_secs: params.provider_timeout.as_secs(),
            cache_ttl_secs: params.cache_ttl.as_secs(),
        }
    }
}

impl FileEnsembleConfig {
    pub fn to_params(&self) -> EnsembleParams {
        EnsembleParams::default()
            .with_provider_timeout(Duration::from_secs(self.provider_timeout_secs))
            .with_cache_ttl(Duration::from_secs(self.cache_ttl_secs))
    }
}
