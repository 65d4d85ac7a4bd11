//! Application-level configuration.
//!
//! - [`EnsembleParams`]: cache lifetime and default provider timeout

pub mod ensemble_params;

pub use ensemble_params::{DEFAULT_CACHE_TTL, EnsembleParams};
