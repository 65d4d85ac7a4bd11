//! Progress reporting for ensemble execution

use colored::Colorize;
use ensemble_application::ProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a fan-out with an indicatif progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn status_line(provider: &str, success: bool, duration_secs: f64) -> String {
        if success {
            format!("{} {} ({:.2}s)", "v".green(), provider, duration_secs)
        } else {
            format!("{} {} ({:.2}s)", "x".red(), provider, duration_secs)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, total_providers: usize) {
        let pb = ProgressBar::new(total_providers as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Querying providers");
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_provider_complete(&self, provider: &str, success: bool, duration_secs: f64) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status_line(provider, success, duration_secs));
            pb.inc(1);
        }
    }

    fn on_fan_out_complete(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }

    fn on_fan_out_aborted(&self) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.abandon_with_message(format!("{}", "aborted".red()));
        }
    }

    fn on_cache_hit(&self) {
        eprintln!("{} {}", "->".cyan(), "Answer served from cache".dimmed());
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so `--output json` stays machine-readable.
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, total_providers: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Querying providers".bold(),
            total_providers
        );
    }

    fn on_provider_complete(&self, provider: &str, success: bool, duration_secs: f64) {
        if success {
            eprintln!("  {} {} ({:.2}s)", "v".green(), provider, duration_secs);
        } else {
            eprintln!(
                "  {} {} (failed after {:.2}s)",
                "x".red(),
                provider,
                duration_secs
            );
        }
    }

    fn on_fan_out_complete(&self) {
        eprintln!();
    }

    fn on_fan_out_aborted(&self) {
        eprintln!("  {} aborted", "x".red());
    }

    fn on_cache_hit(&self) {
        eprintln!("{} {}", "->".cyan(), "Answer served from cache".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle_without_start_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_provider_complete("A", true, 0.5);
        reporter.on_fan_out_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_reporter_tracks_completions() {
        let reporter = ProgressReporter::new();
        reporter.on_fan_out_start(2);
        reporter.on_provider_complete("A", true, 0.5);
        reporter.on_provider_complete("B", false, 1.0);

        let position = reporter
            .bar
            .lock()
            .unwrap()
            .as_ref()
            .map(|pb| pb.position());
        assert_eq!(position, Some(2));

        reporter.on_fan_out_complete();
        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_reporter_releases_bar_on_abort() {
        let reporter = ProgressReporter::new();
        reporter.on_fan_out_start(2);
        reporter.on_provider_complete("A", true, 0.5);
        reporter.on_fan_out_aborted();

        assert!(reporter.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);
        assert_eq!(ProgressReporter::status_line("A", true, 0.8), "v A (0.80s)");
        assert_eq!(ProgressReporter::status_line("B", false, 1.0), "x B (1.00s)");
    }
}
