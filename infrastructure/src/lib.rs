//! Infrastructure layer for llm-ensemble
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider HTTP clients, cache stores,
//! and configuration file loading.

pub mod cache;
pub mod config;
pub mod providers;

// Re-export commonly used types
pub use cache::{InMemoryCacheStore, RedisCacheStore};
pub use config::{CacheBackend, ConfigLoader, ConfigValidationError, FileConfig};
pub use providers::{
    GeminiClient, OpenAiCompatibleClient, ProviderKind, ProviderSetupError, build_adapters,
};
