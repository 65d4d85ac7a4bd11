//! Domain layer for llm-ensemble
//!
//! This crate contains the core value objects and the judge policy.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Ensemble
//!
//! A single [`Query`] is sent to several providers at once. Every provider
//! settles into a [`ProviderOutcome`] (success with content, or error with a
//! reason) and the ordered set of outcomes is an [`EnsembleResult`].
//!
//! ## Judge
//!
//! A [`JudgePolicy`] picks one successful outcome. The result, together with
//! all outcomes, forms the [`AggregatedResponse`] that is cached and
//! returned.

pub mod core;
pub mod ensemble;
pub mod judge;

// Re-export commonly used types
pub use core::{error::DomainError, query::Query};
pub use ensemble::{AggregatedResponse, EnsembleResult, OutcomeStatus, ProviderOutcome};
pub use judge::{FastestResponder, JudgePolicy, Verdict};
