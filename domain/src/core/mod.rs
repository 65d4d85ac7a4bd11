//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: the opaque user query, also the cache key
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
