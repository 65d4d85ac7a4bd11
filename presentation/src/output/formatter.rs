//! Output formatter trait

use crate::cli::commands::OutputFormat;
use ensemble_domain::AggregatedResponse;

/// Trait for formatting ensemble responses
pub trait OutputFormatter {
    /// Format every provider outcome plus the judge result
    fn format(&self, response: &AggregatedResponse) -> String;

    /// Format as JSON
    fn format_json(&self, response: &AggregatedResponse) -> String;

    /// Format the judge result only (concise output)
    fn format_answer_only(&self, response: &AggregatedResponse) -> String;
}

/// Render a response in the requested format through any formatter
pub fn render(
    formatter: &dyn OutputFormatter,
    format: OutputFormat,
    response: &AggregatedResponse,
) -> String {
    match format {
        OutputFormat::Answer => formatter.format_answer_only(response),
        OutputFormat::Full => formatter.format(response),
        OutputFormat::Json => formatter.format_json(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::{EnsembleResult, ProviderOutcome};
    use std::time::Duration;

    /// Tags each format so the dispatch is visible
    struct TaggingFormatter;

    impl OutputFormatter for TaggingFormatter {
        fn format(&self, response: &AggregatedResponse) -> String {
            format!("full:{}", response.input_query)
        }

        fn format_json(&self, response: &AggregatedResponse) -> String {
            format!("json:{}", response.input_query)
        }

        fn format_answer_only(&self, response: &AggregatedResponse) -> String {
            format!("answer:{}", response.input_query)
        }
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let response = AggregatedResponse::new(
            "q",
            "[JUDGE: Chose A in 0.10s] a",
            EnsembleResult::new(vec![ProviderOutcome::success(
                "A",
                "a",
                Duration::from_millis(100),
            )]),
        );

        assert_eq!(render(&TaggingFormatter, OutputFormat::Answer, &response), "answer:q");
        assert_eq!(render(&TaggingFormatter, OutputFormat::Full, &response), "full:q");
        assert_eq!(render(&TaggingFormatter, OutputFormat::Json, &response), "json:q");
    }
}
