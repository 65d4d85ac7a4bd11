//! Ensemble value objects - immutable result types for one fanned-out query.
//!
//! - [`ProviderOutcome`] - One provider's answer or failure, with timing
//! - [`EnsembleResult`] - Every provider's outcome, in invocation order
//! - [`AggregatedResponse`] - The judged answer plus all outcomes; this is
//!   what gets cached and returned to callers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal state of a single provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Error => write!(f, "error"),
        }
    }
}

/// Result of invoking one provider adapter.
///
/// Exactly one of `content` / `error_message` is set, matching `status`.
/// The constructors are the only way to build one, and deserialization
/// rejects records that break the rule.
///
/// # Examples
///
/// ```
/// use ensemble_domain::{OutcomeStatus, ProviderOutcome};
/// use std::time::Duration;
///
/// let ok = ProviderOutcome::success("Gemini Flash", "4", Duration::from_millis(800));
/// assert_eq!(ok.status(), OutcomeStatus::Success);
/// assert_eq!(ok.content(), Some("4"));
/// assert!(ok.error_message().is_none());
///
/// let failed = ProviderOutcome::failure("Llama-3 (Groq)", "timeout", Duration::from_secs(2));
/// assert_eq!(failed.error_message(), Some("timeout"));
/// assert!(failed.content().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRecord")]
pub struct ProviderOutcome {
    #[serde(rename = "model")]
    provider_name: String,
    status: OutcomeStatus,
    /// Wall-clock seconds, measured on both the success and the failure path.
    duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ProviderOutcome {
    /// Creates a successful outcome carrying the provider's raw text.
    pub fn success(
        provider_name: impl Into<String>,
        content: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            status: OutcomeStatus::Success,
            duration: elapsed.as_secs_f64(),
            content: Some(content.into()),
            error_message: None,
        }
    }

    /// Creates a failed outcome carrying a human-readable reason.
    ///
    /// `elapsed` is the time spent until the failure was observed.
    pub fn failure(
        provider_name: impl Into<String>,
        error_message: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            status: OutcomeStatus::Error,
            duration: elapsed.as_secs_f64(),
            content: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    /// Returns `true` if the provider answered.
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Elapsed wall-clock time of the call, in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Wire form of [`ProviderOutcome`], validated on the way in.
#[derive(Deserialize)]
struct OutcomeRecord {
    model: String,
    status: OutcomeStatus,
    duration: f64,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl TryFrom<OutcomeRecord> for ProviderOutcome {
    type Error = String;

    fn try_from(record: OutcomeRecord) -> Result<Self, Self::Error> {
        match (record.status, record.content, record.error) {
            (OutcomeStatus::Success, Some(content), None) => Ok(Self {
                provider_name: record.model,
                status: OutcomeStatus::Success,
                duration: record.duration,
                content: Some(content),
                error_message: None,
            }),
            (OutcomeStatus::Error, None, Some(error)) => Ok(Self {
                provider_name: record.model,
                status: OutcomeStatus::Error,
                duration: record.duration,
                content: None,
                error_message: Some(error),
            }),
            (status, _, _) => Err(format!(
                "outcome for '{}' with status '{}' must carry exactly {}",
                record.model,
                status,
                match status {
                    OutcomeStatus::Success => "`content`",
                    OutcomeStatus::Error => "`error`",
                }
            )),
        }
    }
}

/// Every provider's outcome for one query, in invocation order (not
/// completion order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnsembleResult {
    outcomes: Vec<ProviderOutcome>,
}

impl EnsembleResult {
    pub fn new(outcomes: Vec<ProviderOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ProviderOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Returns an iterator over only the successful outcomes.
    pub fn successful(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Returns an iterator over only the failed outcomes.
    pub fn failed(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn into_outcomes(self) -> Vec<ProviderOutcome> {
        self.outcomes
    }
}

impl From<Vec<ProviderOutcome>> for EnsembleResult {
    fn from(outcomes: Vec<ProviderOutcome>) -> Self {
        Self::new(outcomes)
    }
}

impl<'a> IntoIterator for &'a EnsembleResult {
    type Item = &'a ProviderOutcome;
    type IntoIter = std::slice::Iter<'a, ProviderOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// Final artifact of a query: returned to the caller and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// The original query text
    pub input_query: String,
    /// Judge annotation followed by the chosen content
    pub final_judge_result: String,
    /// Every provider's outcome
    pub model_results: EnsembleResult,
}

impl AggregatedResponse {
    pub fn new(
        input_query: impl Into<String>,
        final_judge_result: impl Into<String>,
        model_results: EnsembleResult,
    ) -> Self {
        Self {
            input_query: input_query.into(),
            final_judge_result: final_judge_result.into(),
            model_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ensemble() -> EnsembleResult {
        EnsembleResult::new(vec![
            ProviderOutcome::failure("Llama-3 (Groq)", "timeout", Duration::from_millis(300)),
            ProviderOutcome::success("Gemini Flash", "4", Duration::from_millis(500)),
        ])
    }

    #[test]
    fn test_success_outcome_fields() {
        let outcome = ProviderOutcome::success("A", "4", Duration::from_millis(800));
        assert!(outcome.is_success());
        assert_eq!(outcome.provider_name(), "A");
        assert!((outcome.duration_secs() - 0.8).abs() < 1e-9);
        assert_eq!(outcome.content(), Some("4"));
        assert_eq!(outcome.error_message(), None);
    }

    #[test]
    fn test_failure_outcome_keeps_duration() {
        let outcome = ProviderOutcome::failure("A", "boom", Duration::from_millis(250));
        assert_eq!(outcome.status(), OutcomeStatus::Error);
        assert!((outcome.duration_secs() - 0.25).abs() < 1e-9);
        assert_eq!(outcome.content(), None);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let ensemble = sample_ensemble();
        let value = serde_json::to_value(&ensemble).unwrap();

        assert_eq!(value[0]["model"], "Llama-3 (Groq)");
        assert_eq!(value[0]["status"], "error");
        assert_eq!(value[0]["error"], "timeout");
        assert!(value[0].get("content").is_none());

        assert_eq!(value[1]["model"], "Gemini Flash");
        assert_eq!(value[1]["status"], "success");
        assert_eq!(value[1]["content"], "4");
        assert!(value[1].get("error").is_none());
    }

    #[test]
    fn test_deserialize_rejects_success_without_content() {
        let json = r#"{"model":"A","status":"success","duration":0.1,"error":"x"}"#;
        assert!(serde_json::from_str::<ProviderOutcome>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_error_with_both_fields() {
        let json = r#"{"model":"A","status":"error","duration":0.1,"content":"4","error":"x"}"#;
        assert!(serde_json::from_str::<ProviderOutcome>(json).is_err());
    }

    #[test]
    fn test_deserialize_accepts_null_optional_fields() {
        let json = r#"{"model":"A","status":"success","duration":0.1,"content":"4","error":null}"#;
        let outcome: ProviderOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.content(), Some("4"));
    }

    #[test]
    fn test_aggregated_response_round_trip() {
        let response = AggregatedResponse::new(
            "2+2?",
            "[JUDGE: Chose Gemini Flash in 0.50s] 4",
            sample_ensemble(),
        );
        let json = serde_json::to_string(&response).unwrap();
        let back: AggregatedResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn test_round_trip_keeps_nanosecond_durations() {
        let elapsed = [
            Duration::from_nanos(1_010_720_014),
            Duration::from_nanos(1_000_007),
            Duration::from_nanos(1_999_992_081),
        ];
        for elapsed in elapsed {
            let response = AggregatedResponse::new(
                "q",
                "[JUDGE: Chose A in 1.01s] a",
                EnsembleResult::new(vec![
                    ProviderOutcome::success("A", "a", elapsed),
                    ProviderOutcome::failure("B", "timeout", elapsed * 3),
                ]),
            );
            let json = serde_json::to_string(&response).unwrap();
            let back: AggregatedResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(back, response, "duration {:?} changed in transit", elapsed);
        }
    }

    #[test]
    fn test_successful_and_failed_filters() {
        let ensemble = sample_ensemble();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.successful().count(), 1);
        assert_eq!(ensemble.failed().count(), 1);
        assert_eq!(
            ensemble.successful().next().unwrap().provider_name(),
            "Gemini Flash"
        );
    }
}
