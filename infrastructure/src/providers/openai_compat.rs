//! OpenAI-compatible chat completions client (Groq)

use super::{status_error, transport_error};
use async_trait::async_trait;
use ensemble_application::{CompletionClient, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for any `POST {base}/chat/completions` endpoint with bearer auth.
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    display_name: String,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl OpenAiCompatibleClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        model: &str,
        display_name: &str,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            temperature: None,
            display_name: display_name.to_string(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body<'a>(&'a self, query: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: query,
            }],
            temperature: self.temperature,
        }
    }
}

/// Extract the first choice's message text.
fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("response had no message content".into()))
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    fn provider_name(&self) -> &str {
        &self.display_name
    }

    async fn complete(&self, query: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Authentication("no API key configured".into()))?;

        debug!("POST {} (model {})", self.endpoint(), self.model);
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.request_body(query))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::new(
            reqwest::Client::new(),
            "https://api.groq.com/openai/v1/",
            None,
            "llama-3.3-70b-versatile",
            "Llama-3 (Groq)",
        )
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            client().endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = client().with_temperature(0.5);
        let body = serde_json::to_value(client.request_body("What is Rust?")).unwrap();

        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What is Rust?");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_request_body_omits_unset_temperature() {
        let client = client();
        let body = serde_json::to_value(client.request_body("hi")).unwrap();
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"A systems language."}},
                       {"message":{"role":"assistant","content":"ignored"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "A systems language.");
    }

    #[test]
    fn test_parse_empty_choices_is_malformed() {
        assert!(matches!(
            parse_response(r#"{"choices":[]}"#),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        assert!(matches!(
            parse_response("<html>bad gateway</html>"),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let result = client().complete("hi").await;
        assert!(matches!(result, Err(ProviderError::Authentication(_))));
    }
}
