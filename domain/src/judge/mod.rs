//! Judge domain
//!
//! Turns a set of successful outcomes into one final answer. The selection
//! rule is a [`JudgePolicy`](policy::JudgePolicy); the default
//! [`FastestResponder`](policy::FastestResponder) picks the lowest latency.

pub mod policy;
pub mod verdict;

pub use policy::{FastestResponder, JudgePolicy};
pub use verdict::Verdict;
