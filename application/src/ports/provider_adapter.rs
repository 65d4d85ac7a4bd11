//! Provider adapter port
//!
//! The orchestrator is polymorphic over [`ProviderAdapter`]: anything that
//! takes a query and always settles into a [`ProviderOutcome`]. The
//! standard implementation, [`GuardedAdapter`], wraps a
//! [`CompletionClient`] with timing, a timeout and error containment.

use crate::ports::completion_client::{CompletionClient, ProviderError};
use async_trait::async_trait;
use ensemble_domain::ProviderOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Default upper bound for a single provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Uniform wrapper around one model backend
///
/// `invoke` never fails: every provider-side problem becomes an
/// error-status outcome.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider label, as it appears in outcomes
    fn name(&self) -> &str;

    /// Run the query against the provider and report how it went
    async fn invoke(&self, query: &str) -> ProviderOutcome;
}

/// [`ProviderAdapter`] over a [`CompletionClient`], bounded by a timeout.
///
/// Duration is measured on both paths, so failed outcomes report the time
/// spent until the failure (or the timeout) was observed.
pub struct GuardedAdapter {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl GuardedAdapter {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ProviderAdapter for GuardedAdapter {
    fn name(&self) -> &str {
        self.client.provider_name()
    }

    async fn invoke(&self, query: &str) -> ProviderOutcome {
        let name = self.client.provider_name();
        let started = Instant::now();

        let result = match tokio::time::timeout(self.timeout, self.client.complete(query)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };
        let elapsed = started.elapsed();

        match result {
            Ok(content) => {
                debug!("Provider {} answered in {:.3}s", name, elapsed.as_secs_f64());
                ProviderOutcome::success(name, content, elapsed)
            }
            Err(e) => {
                warn!(
                    "Provider {} failed after {:.3}s: {}",
                    name,
                    elapsed.as_secs_f64(),
                    e
                );
                ProviderOutcome::failure(name, e.to_string(), elapsed)
            }
        }
    }
}
