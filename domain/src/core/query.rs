//! Query value object

use serde::{Deserialize, Serialize};

/// A user query fanned out to every provider (Value Object)
///
/// The text is opaque: it is never trimmed, lowercased or otherwise
/// normalized, and it doubles as the cache key. `"2+2?"` and `"2+2? "` are
/// different queries with different cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Get the raw query text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Key under which the aggregated response for this query is cached
    pub fn cache_key(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}
