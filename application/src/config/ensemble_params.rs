//! Ensemble parameters for use case control.
//!
//! [`EnsembleParams`] groups the static parameters used by
//! [`HandleQueryUseCase`](crate::use_cases::handle_query::HandleQueryUseCase)
//! and by whoever builds the provider adapters. These are application-layer
//! concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default lifetime of a cached aggregated response (one hour)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Ensemble control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleParams {
    /// Time-to-live for cached aggregated responses.
    pub cache_ttl: Duration,
    /// Timeout applied to providers that do not set their own.
    pub provider_timeout: Duration,
}

impl Default for EnsembleParams {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            provider_timeout: crate::ports::provider_adapter::DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl EnsembleParams {
    // ==================== Builder Methods ====================

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }
}
