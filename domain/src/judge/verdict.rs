//! Rendering of the judge's decision into `final_judge_result`.

use crate::ensemble::value_objects::ProviderOutcome;

/// The outcome chosen by a judge policy
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub provider_name: String,
    pub duration_secs: f64,
    pub content: String,
}

impl Verdict {
    /// Build a verdict from a chosen outcome. Returns `None` for failures.
    pub fn from_outcome(outcome: &ProviderOutcome) -> Option<Self> {
        let content = outcome.content()?;
        Some(Self {
            provider_name: outcome.provider_name().to_string(),
            duration_secs: outcome.duration_secs(),
            content: content.to_string(),
        })
    }

    /// Provenance annotation without the content, e.g.
    /// `[JUDGE: Chose Gemini Flash in 0.80s]`.
    pub fn annotation(&self) -> String {
        format!(
            "[JUDGE: Chose {} in {:.2}s]",
            self.provider_name, self.duration_secs
        )
    }

    /// Annotation and content separated by a single space.
    pub fn render(&self) -> String {
        format!("{} {}", self.annotation(), self.content)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
