//! Cache store implementations
//!
//! - [`RedisCacheStore`]: shared cache across processes (default)
//! - [`InMemoryCacheStore`]: process-local cache for single-instance runs
//!
//! `NoCache` from the application layer covers the "disabled" backend.

mod memory;
mod redis;

pub use self::memory::InMemoryCacheStore;
pub use self::redis::RedisCacheStore;
