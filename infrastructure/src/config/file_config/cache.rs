//! Cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};

/// Which cache store backs the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
    None,
}

impl CacheBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Redis => "redis",
            CacheBackend::Memory => "memory",
            CacheBackend::None => "none",
        }
    }

    pub fn valid_values() -> &'static [&'static str] {
        &["redis", "memory", "none"]
    }
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "in-memory" => Ok(CacheBackend::Memory),
            "none" | "off" | "disabled" => Ok(CacheBackend::None),
            other => Err(format!(
                "unknown cache backend '{}' (expected one of: {})",
                other,
                Self::valid_values().join(", ")
            )),
        }
    }
}

/// Raw cache configuration from TOML
///
/// # Example
///
/// ```toml
/// [cache]
/// backend = "redis"
/// url = "redis://127.0.0.1:6379"
/// connect_timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// `redis`, `memory` or `none`
    pub backend: String,
    /// Redis connection URL
    pub url: String,
    /// Upper bound for acquiring a Redis connection
    pub connect_timeout_secs: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            backend: "redis".to_string(),
            url: "redis://127.0.0.1:6379".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

impl FileCacheConfig {
    pub fn parse_backend(&self) -> Result<CacheBackend, String> {
        self.backend.parse()
    }
}
