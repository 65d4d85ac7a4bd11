//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Every provider in the ensemble failed, so there is nothing to judge.
    #[error("All LLM Providers Failed")]
    NoSuccessfulProvider,

    #[error("Judge failed: {0}")]
    JudgeFailed(String),
}

impl DomainError {
    /// Check if this error means no provider produced an answer
    pub fn is_no_successful_provider(&self) -> bool {
        matches!(self, DomainError::NoSuccessfulProvider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_successful_provider_display() {
        let error = DomainError::NoSuccessfulProvider;
        assert_eq!(error.to_string(), "All LLM Providers Failed");
    }

    #[test]
    fn test_is_no_successful_provider_check() {
        assert!(DomainError::NoSuccessfulProvider.is_no_successful_provider());
        assert!(!DomainError::JudgeFailed("boom".to_string()).is_no_successful_provider());
    }
}
