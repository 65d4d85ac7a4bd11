//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Provider names accepted in `providers.enabled`
pub const KNOWN_PROVIDERS: &[&str] = &["groq", "gemini"];

/// Look up an API key: an inline key wins over the environment variable.
fn resolve_key(inline: Option<&String>, env_name: &str) -> Option<String> {
    inline
        .cloned()
        .or_else(|| std::env::var(env_name).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Groq (OpenAI-compatible chat completions) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroqConfig {
    /// Environment variable name for the API key (default: "GROQ_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Label reported in outcomes.
    pub display_name: String,
    /// Overrides `ensemble.provider_timeout_secs` for this provider.
    pub timeout_secs: Option<u64>,
}

impl Default for FileGroqConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.5,
            display_name: "Llama-3 (Groq)".to_string(),
            timeout_secs: None,
        }
    }
}

impl FileGroqConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_ref(), &self.api_key_env)
    }
}

/// Google Gemini settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub display_name: String,
    pub timeout_secs: Option<u64>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            display_name: "Gemini Flash".to_string(),
            timeout_secs: None,
        }
    }
}

impl FileGeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_ref(), &self.api_key_env)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Providers to fan out to, in invocation order.
    pub enabled: Vec<String>,
    pub groq: FileGroqConfig,
    pub gemini: FileGeminiConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["groq".to_string(), "gemini".to_string()],
            groq: FileGroqConfig::default(),
            gemini: FileGeminiConfig::default(),
        }
    }
}
