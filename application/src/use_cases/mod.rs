//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod handle_query;
pub mod judge_outcomes;
pub mod run_ensemble;

#[cfg(test)]
pub(crate) mod test_support;
