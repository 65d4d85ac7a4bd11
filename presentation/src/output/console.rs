//! Console output formatter for ensemble responses

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use ensemble_domain::{AggregatedResponse, ProviderOutcome};

/// Formats ensemble responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every outcome and the judge result
    pub fn format(response: &AggregatedResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Ensemble Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Query:".cyan().bold(),
            response.input_query
        ));

        let outcomes = response.model_results.outcomes();
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        output.push_str(&format!(
            "{} {} of {} succeeded\n",
            "Providers:".cyan().bold(),
            succeeded,
            outcomes.len()
        ));

        output.push_str(&Self::section_header("Provider Outcomes"));
        for outcome in outcomes {
            output.push_str(&Self::format_outcome(outcome));
        }

        output.push_str(&Self::section_header("Judge"));
        output.push_str(&format!("\n{}\n", response.final_judge_result));

        output.push_str(&Self::footer());

        output
    }

    fn format_outcome(outcome: &ProviderOutcome) -> String {
        let title = format!(
            "── {} ({:.2}s) ──",
            outcome.provider_name(),
            outcome.duration_secs()
        );
        match (outcome.content(), outcome.error_message()) {
            (Some(content), _) => format!("\n{}\n{}\n", title.yellow().bold(), content),
            (None, error) => format!(
                "\n{}\nError: {}\n",
                title.red().bold(),
                error.unwrap_or("Unknown")
            ),
        }
    }

    /// Format as JSON
    pub fn format_json(response: &AggregatedResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the judge result only
    pub fn format_answer_only(response: &AggregatedResponse) -> String {
        format!("{}\n", response.final_judge_result)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, response: &AggregatedResponse) -> String {
        Self::format(response)
    }

    fn format_json(&self, response: &AggregatedResponse) -> String {
        Self::format_json(response)
    }

    fn format_answer_only(&self, response: &AggregatedResponse) -> String {
        Self::format_answer_only(response)
    }
}
