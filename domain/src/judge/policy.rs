//! Judge policy trait
//!
//! A policy decides which successful outcome becomes the final answer.
//! Policies only see outcomes that already succeeded; filtering and the
//! "nobody answered" failure live in the judge use case.

use crate::core::error::DomainError;
use crate::core::query::Query;
use crate::ensemble::value_objects::ProviderOutcome;
use async_trait::async_trait;

/// Selection strategy over successful provider outcomes
///
/// `pick` returns an index into `candidates`. Candidates arrive in
/// invocation order, so a policy that wants "first wins" tie-breaking only
/// has to prefer lower indices.
///
/// The trait is async so a future policy can ask a model to grade the
/// answers without touching the orchestrator or the cache coordinator.
#[async_trait]
pub trait JudgePolicy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Choose one of `candidates`.
    async fn pick(
        &self,
        query: &Query,
        candidates: &[&ProviderOutcome],
    ) -> Result<usize, DomainError>;
}

/// Latency-only policy: the fastest responder wins.
///
/// Ties keep the earliest-invoked provider. This is a placeholder for a
/// quality-scoring judge.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestResponder;

#[async_trait]
impl JudgePolicy for FastestResponder {
    fn name(&self) -> &'static str {
        "fastest-responder"
    }

    async fn pick(
        &self,
        _query: &Query,
        candidates: &[&ProviderOutcome],
    ) -> Result<usize, DomainError> {
        fastest_index(candidates).ok_or(DomainError::NoSuccessfulProvider)
    }
}

/// Index of the minimum-duration candidate; strict `<` keeps the first minimum.
fn fastest_index(candidates: &[&ProviderOutcome]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let duration = candidate.duration_secs();
        match best {
            Some((_, best_duration)) if duration >= best_duration => {}
            _ => best = Some((index, duration)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ok(name: &str, content: &str, millis: u64) -> ProviderOutcome {
        ProviderOutcome::success(name, content, Duration::from_millis(millis))
    }

    #[tokio::test]
    async fn test_fastest_wins() {
        let a = ok("A", "slow", 1200);
        let b = ok("B", "fast", 300);
        let c = ok("C", "medium", 700);

        let picked = FastestResponder
            .pick(&Query::from("q"), &[&a, &b, &c])
            .await
            .unwrap();
        assert_eq!(picked, 1);
    }

    #[tokio::test]
    async fn test_tie_keeps_earliest_invoked() {
        let a = ok("A", "first", 500);
        let b = ok("B", "second", 500);

        let picked = FastestResponder
            .pick(&Query::from("q"), &[&a, &b])
            .await
            .unwrap();
        assert_eq!(picked, 0);
    }

    #[tokio::test]
    async fn test_tie_after_faster_earlier_candidate() {
        let a = ok("A", "slow", 900);
        let b = ok("B", "fast-1", 100);
        let c = ok("C", "fast-2", 100);

        let picked = FastestResponder
            .pick(&Query::from("q"), &[&a, &b, &c])
            .await
            .unwrap();
        assert_eq!(picked, 1);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_no_successful_provider() {
        let err = FastestResponder
            .pick(&Query::from("q"), &[])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NoSuccessfulProvider);
    }

    #[test]
    fn test_policy_name() {
        assert_eq!(FastestResponder.name(), "fastest-responder");
    }
}
