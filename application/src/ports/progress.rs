//! Progress notification port
//!
//! Defines the interface for reporting progress while an ensemble runs.

/// Callback for progress updates during a fan-out
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when every provider has been dispatched
    fn on_fan_out_start(&self, total_providers: usize);

    /// Called when one provider settles
    fn on_provider_complete(&self, provider: &str, success: bool, duration_secs: f64);

    /// Called once every provider has settled
    fn on_fan_out_complete(&self);

    /// Called when the fan-out stops early (cancellation or a crashed task)
    fn on_fan_out_aborted(&self) {}

    /// Called when the answer was served from the cache
    fn on_cache_hit(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _total_providers: usize) {}
    fn on_provider_complete(&self, _provider: &str, _success: bool, _duration_secs: f64) {}
    fn on_fan_out_complete(&self) {}
}
