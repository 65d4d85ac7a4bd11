//! Test doubles shared by the use case tests.

use crate::ports::cache_store::{CacheError, CacheStore};
use crate::ports::progress::ProgressNotifier;
use crate::ports::provider_adapter::ProviderAdapter;
use async_trait::async_trait;
use ensemble_domain::ProviderOutcome;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Script {
    Answer(String),
    Fail(String),
    Panic,
}

/// Adapter that sleeps for `delay`, then answers, fails or panics.
///
/// The reported duration is the scripted delay.
pub struct MockAdapter {
    name: String,
    delay: Duration,
    script: Script,
    calls: AtomicUsize,
    completions: AtomicUsize,
}

impl MockAdapter {
    fn build(name: &str, delay: Duration, script: Script) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            delay,
            script,
            calls: AtomicUsize::new(0),
            completions: AtomicUsize::new(0),
        })
    }

    pub fn answering(name: &str, content: &str, delay: Duration) -> Arc<Self> {
        Self::build(name, delay, Script::Answer(content.to_string()))
    }

    pub fn failing(name: &str, error: &str, delay: Duration) -> Arc<Self> {
        Self::build(name, delay, Script::Fail(error.to_string()))
    }

    pub fn panicking(name: &str) -> Arc<Self> {
        Self::build(name, Duration::ZERO, Script::Panic)
    }

    /// Number of times `invoke` was entered
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of times `invoke` ran to completion
    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, _query: &str) -> ProviderOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.completions.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Answer(content) => ProviderOutcome::success(&self.name, content, self.delay),
            Script::Fail(error) => ProviderOutcome::failure(&self.name, error, self.delay),
            Script::Panic => panic!("adapter {} exploded", self.name),
        }
    }
}

/// In-memory cache that records traffic and can be told to fail.
#[derive(Default)]
pub struct MockCache {
    entries: Mutex<HashMap<String, (String, Duration)>>,
    fail_reads: bool,
    fail_writes: bool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MockCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_reads() -> Arc<Self> {
        Arc::new(Self {
            fail_reads: true,
            ..Self::default()
        })
    }

    pub fn failing_writes() -> Arc<Self> {
        Arc::new(Self {
            fail_writes: true,
            ..Self::default()
        })
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Duration::from_secs(3600)));
    }

    pub fn entry(&self, key: &str) -> Option<(String, Duration)> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for MockCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(CacheError::Unavailable("connection refused".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(CacheError::Backend("READONLY".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }
}

/// Progress notifier that records every callback as a string.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_fan_out_start(&self, total_providers: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start:{}", total_providers));
    }

    fn on_provider_complete(&self, provider: &str, success: bool, _duration_secs: f64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}:{}", provider, success));
    }

    fn on_fan_out_complete(&self) {
        self.events.lock().unwrap().push("complete".to_string());
    }

    fn on_fan_out_aborted(&self) {
        self.events.lock().unwrap().push("aborted".to_string());
    }

    fn on_cache_hit(&self) {
        self.events.lock().unwrap().push("cache_hit".to_string());
    }
}
