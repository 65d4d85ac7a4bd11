//! Run Ensemble use case
//!
//! Fans one query out to every provider adapter concurrently and waits for
//! all of them to settle.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_adapter::ProviderAdapter;
use ensemble_domain::{EnsembleResult, ProviderOutcome, Query};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while running the ensemble
///
/// Provider failures are never reported here; they are outcomes.
#[derive(Error, Debug)]
pub enum EnsembleError {
    #[error("Internal error while running providers: {0}")]
    FatalInternal(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl EnsembleError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EnsembleError::Cancelled)
    }
}

/// Use case for running every provider against one query
pub struct RunEnsembleUseCase {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl RunEnsembleUseCase {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { adapters }
    }

    /// Configured adapters, in invocation order
    pub fn adapters(&self) -> &[Arc<dyn ProviderAdapter>] {
        &self.adapters
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, query: &Query) -> Result<EnsembleResult, EnsembleError> {
        self.execute_with_progress(query, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<EnsembleResult, EnsembleError> {
        self.execute_cancellable(query, progress, &CancellationToken::new())
            .await
    }

    /// Execute the use case, aborting every in-flight provider call when
    /// `cancellation` fires.
    ///
    /// The result holds exactly one outcome per adapter, ordered like
    /// [`adapters`](Self::adapters) regardless of which provider finished
    /// first.
    pub async fn execute_cancellable(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
        cancellation: &CancellationToken,
    ) -> Result<EnsembleResult, EnsembleError> {
        info!("Fanning out query to {} providers", self.adapters.len());
        progress.on_fan_out_start(self.adapters.len());

        let mut join_set = JoinSet::new();

        for (index, adapter) in self.adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let query = query.as_str().to_string();

            join_set.spawn(async move {
                let outcome = adapter.invoke(&query).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<ProviderOutcome>> = vec![None; self.adapters.len()];

        loop {
            let next = tokio::select! {
                biased;
                _ = cancellation.cancelled() => None,
                joined = join_set.join_next() => Some(joined),
            };

            let Some(joined) = next else {
                warn!("Ensemble cancelled, aborting {} provider calls", join_set.len());
                join_set.abort_all();
                progress.on_fan_out_aborted();
                return Err(EnsembleError::Cancelled);
            };

            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok((index, outcome)) => {
                    debug!(
                        "Provider {} settled: {}",
                        outcome.provider_name(),
                        outcome.status()
                    );
                    progress.on_provider_complete(
                        outcome.provider_name(),
                        outcome.is_success(),
                        outcome.duration_secs(),
                    );
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    join_set.abort_all();
                    progress.on_fan_out_aborted();
                    return Err(EnsembleError::FatalInternal(format!(
                        "provider task failed: {}",
                        e
                    )));
                }
            }
        }

        progress.on_fan_out_complete();

        let outcomes = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                EnsembleError::FatalInternal("provider task ended without an outcome".to_string())
            })?;

        info!(
            "Ensemble settled: {} succeeded, {} failed",
            outcomes.iter().filter(|o| o.is_success()).count(),
            outcomes.iter().filter(|o| !o.is_success()).count()
        );

        Ok(EnsembleResult::new(outcomes))
    }
}
