//! Judge Outcomes use case
//!
//! Folds an [`EnsembleResult`] into an [`AggregatedResponse`] using a
//! pluggable [`JudgePolicy`].

use ensemble_domain::{
    AggregatedResponse, DomainError, EnsembleResult, FastestResponder, JudgePolicy, Query,
    Verdict,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while judging
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JudgeError {
    #[error("All LLM Providers Failed")]
    NoSuccessfulProvider,

    #[error("Judge policy '{policy}' chose candidate {index} of {candidates}")]
    InvalidChoice {
        policy: &'static str,
        index: usize,
        candidates: usize,
    },

    #[error("Judge policy failed: {0}")]
    PolicyFailed(String),
}

impl From<DomainError> for JudgeError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NoSuccessfulProvider => JudgeError::NoSuccessfulProvider,
            DomainError::JudgeFailed(reason) => JudgeError::PolicyFailed(reason),
        }
    }
}

/// Use case for selecting the final answer
pub struct JudgeOutcomesUseCase {
    policy: Arc<dyn JudgePolicy>,
}

impl JudgeOutcomesUseCase {
    pub fn new(policy: Arc<dyn JudgePolicy>) -> Self {
        Self { policy }
    }

    /// Judge with the default latency-only policy
    pub fn fastest_responder() -> Self {
        Self::new(Arc::new(FastestResponder))
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Pick one successful outcome and build the aggregated response.
    ///
    /// Fails with [`JudgeError::NoSuccessfulProvider`] when no provider
    /// answered; never returns an empty or partial answer.
    pub async fn select(
        &self,
        query: &Query,
        ensemble: EnsembleResult,
    ) -> Result<AggregatedResponse, JudgeError> {
        let candidates: Vec<_> = ensemble.successful().collect();
        if candidates.is_empty() {
            return Err(JudgeError::NoSuccessfulProvider);
        }

        let index = self.policy.pick(query, &candidates).await?;
        let verdict = candidates
            .get(index)
            .and_then(|chosen| Verdict::from_outcome(chosen))
            .ok_or(JudgeError::InvalidChoice {
                policy: self.policy.name(),
                index,
                candidates: candidates.len(),
            })?;

        info!(
            "Judge '{}' chose {} ({:.2}s) out of {} successful providers",
            self.policy.name(),
            verdict.provider_name,
            verdict.duration_secs,
            candidates.len()
        );

        Ok(AggregatedResponse::new(
            query.as_str(),
            verdict.render(),
            ensemble,
        ))
    }
}
