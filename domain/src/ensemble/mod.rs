//! Ensemble domain
//!
//! One query fans out to every configured provider. Each provider settles
//! into a [`ProviderOutcome`](value_objects::ProviderOutcome); the ordered
//! set of outcomes is the [`EnsembleResult`](value_objects::EnsembleResult),
//! which the judge folds into an
//! [`AggregatedResponse`](value_objects::AggregatedResponse).
//!
//! ```text
//! Query ──┬── Provider A ──► ProviderOutcome ─┐
//!         ├── Provider B ──► ProviderOutcome ─┼─► EnsembleResult ─► Judge ─► AggregatedResponse
//!         └── Provider N ──► ProviderOutcome ─┘
//! ```

pub mod value_objects;

pub use value_objects::{AggregatedResponse, EnsembleResult, OutcomeStatus, ProviderOutcome};
