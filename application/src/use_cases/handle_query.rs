//! Handle Query use case
//!
//! Cache-aside coordination around the ensemble:
//!
//! ```text
//! CHECK_CACHE ─┬─ HIT ──► deserialize ──────────────────────────────► return
//!              └─ MISS ─► run ensemble ─► judge ─► serialize + store ─► return
//! ```
//!
//! The cache is strictly best-effort. A failed read or an unreadable entry
//! is a miss; a failed write is logged and the answer is still returned.

use crate::config::EnsembleParams;
use crate::ports::cache_store::CacheStore;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::judge_outcomes::{JudgeError, JudgeOutcomesUseCase};
use crate::use_cases::run_ensemble::{EnsembleError, RunEnsembleUseCase};
use ensemble_domain::{AggregatedResponse, Query};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can fail a query
///
/// Cache problems never show up here.
#[derive(Error, Debug)]
pub enum HandleQueryError {
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),

    #[error(transparent)]
    Judge(#[from] JudgeError),
}

impl HandleQueryError {
    /// Check if every provider failed
    pub fn is_no_successful_provider(&self) -> bool {
        matches!(self, HandleQueryError::Judge(JudgeError::NoSuccessfulProvider))
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HandleQueryError::Ensemble(e) if e.is_cancelled())
    }
}

/// Use case for answering a query through the cache
pub struct HandleQueryUseCase {
    cache: Arc<dyn CacheStore>,
    ensemble: RunEnsembleUseCase,
    judge: JudgeOutcomesUseCase,
    cache_ttl: Duration,
}

impl HandleQueryUseCase {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        ensemble: RunEnsembleUseCase,
        judge: JudgeOutcomesUseCase,
    ) -> Self {
        Self {
            cache,
            ensemble,
            judge,
            cache_ttl: EnsembleParams::default().cache_ttl,
        }
    }

    pub fn with_params(mut self, params: &EnsembleParams) -> Self {
        self.cache_ttl = params.cache_ttl;
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Execute the use case with default (no-op) progress
    pub async fn handle(&self, query: &Query) -> Result<AggregatedResponse, HandleQueryError> {
        self.handle_with_progress(query, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn handle_with_progress(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<AggregatedResponse, HandleQueryError> {
        self.handle_cancellable(query, progress, &CancellationToken::new())
            .await
    }

    /// Execute the use case; cancelling aborts the provider fan-out.
    pub async fn handle_cancellable(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
        cancellation: &CancellationToken,
    ) -> Result<AggregatedResponse, HandleQueryError> {
        if let Some(cached) = self.lookup(query).await {
            info!("Cache hit for query ({} bytes)", query.as_str().len());
            progress.on_cache_hit();
            return Ok(cached);
        }

        info!("Cache miss, running ensemble");

        let ensemble = self
            .ensemble
            .execute_cancellable(query, progress, cancellation)
            .await?;
        let response = self.judge.select(query, ensemble).await?;

        self.store(query, &response).await;

        Ok(response)
    }

    /// Read and decode the cached entry. Any failure counts as a miss.
    async fn lookup(&self, query: &Query) -> Option<AggregatedResponse> {
        let raw = match self.cache.get(query.cache_key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    /// Serialize and store the response. Failures are logged and swallowed.
    async fn store(&self, query: &Query, response: &AggregatedResponse) {
        let serialized = match serde_json::to_string(response) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Could not serialize response for caching: {}", e);
                return;
            }
        };

        match self
            .cache
            .set(query.cache_key(), &serialized, self.cache_ttl)
            .await
        {
            Ok(()) => debug!("Cached response for {}s", self.cache_ttl.as_secs()),
            Err(e) => warn!("Cache write failed, returning uncached response: {}", e),
        }
    }
}
