//! Application layer for llm-ensemble
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_CACHE_TTL, EnsembleParams};
pub use ports::{
    cache_store::{CacheError, CacheStore, NoCache},
    completion_client::{CompletionClient, ProviderError},
    progress::{NoProgress, ProgressNotifier},
    provider_adapter::{DEFAULT_PROVIDER_TIMEOUT, GuardedAdapter, ProviderAdapter},
};
pub use use_cases::handle_query::{HandleQueryError, HandleQueryUseCase};
pub use use_cases::judge_outcomes::{JudgeError, JudgeOutcomesUseCase};
pub use use_cases::run_ensemble::{EnsembleError, RunEnsembleUseCase};
