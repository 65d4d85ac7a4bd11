//! Configuration file loading for llm-ensemble
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ENSEMBLE_*` environment variables (`__` separates nesting levels)
//! 2. `--config <path>` specified file
//! 3. Project root: `./ensemble.toml` or `./.ensemble.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/llm-ensemble/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    CacheBackend, ConfigValidationError, FileCacheConfig, FileConfig, FileEnsembleConfig,
    FileGeminiConfig, FileGroqConfig, FileProvidersConfig, FileServerConfig, KNOWN_PROVIDERS,
};
pub use loader::ConfigLoader;
