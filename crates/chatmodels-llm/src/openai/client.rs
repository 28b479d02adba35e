// OpenAI-specific client implementation

use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
///
/// The underlying connection is opened lazily on the first request.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Point the client at another OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build chat completion request payload
    fn build_chat_request(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: &ChatOptions,
    ) -> Result<Value> {
        let openai_messages = serde_json::to_value(messages)
            .context("Failed to serialize messages")?;

        let mut obj = Map::new();
        obj.insert("model".to_string(), serde_json::json!(model));
        obj.insert("messages".to_string(), openai_messages);
        obj.insert("stream".to_string(), Value::Bool(false));

        if let Some(temp) = options.temperature {
            obj.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            obj.insert("max_completion_tokens".to_string(), serde_json::json!(max_tokens));
        }

        Ok(Value::Object(obj))
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(&request.model, request.messages, &request.options)?;
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(url = %url, model = %request.model, "sending chat completion request");

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                anyhow::bail!("OpenAI API error ({}): authentication failed: {}", status, error_text);
            }
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        let raw: OpenAIChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        // Convert to provider-agnostic response
        let choice = raw.choices.first();
        Ok(ChatResponse {
            content: choice.and_then(|c| c.message.content.clone()),
            usage: raw.usage.as_ref().map(|usage| TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason.clone()),
            model: raw.model.clone(),
            raw: serde_json::to_value(&raw)?,
        })
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAIClient {
        OpenAIClient::new("test-key").unwrap()
    }

    #[test]
    fn test_payload_carries_sampling_options() {
        let options = ChatOptions::new().temperature(1.8).max_tokens(20);
        let payload = client()
            .build_chat_request("gpt-4", vec![Message::human("hi")], &options)
            .unwrap();

        assert_eq!(payload["model"], "gpt-4");
        assert_eq!(payload["temperature"], 1.8);
        assert_eq!(payload["max_completion_tokens"], 20);
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "hi");
        assert!(payload.get("max_tokens").is_none());
    }

    #[test]
    fn test_payload_omits_unset_options() {
        let payload = client()
            .build_chat_request("gpt-4", vec![Message::human("hi")], &ChatOptions::default())
            .unwrap();

        assert!(payload.get("temperature").is_none());
        assert!(payload.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_messages_are_plain_user_text() {
        let payload = client()
            .build_chat_request("gpt-4", vec![Message::human("hi")], &ChatOptions::default())
            .unwrap();

        assert_eq!(payload["messages"], serde_json::json!([{"role": "user", "content": "hi"}]));
    }

    #[test]
    fn test_temperature_sent_regardless_of_model() {
        let options = ChatOptions::new().temperature(0.3).max_tokens(50);
        let payload = client()
            .build_chat_request("o1-mini", vec![Message::human("hi")], &options)
            .unwrap();

        assert_eq!(payload["temperature"], 0.3);
        assert_eq!(payload["max_completion_tokens"], 50);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client().with_base_url("http://localhost:1234/v1/");
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = OpenAIClient::new("bad\nkey");
        assert!(result.is_err());
    }
}
