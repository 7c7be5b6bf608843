use crate::config::Settings;
use crate::core::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// Text-completion capability: prompt in, free text out.
///
/// Output is not guaranteed to be well-formed; callers must validate it.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> ClientResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// OpenAI-compatible chat-completions client
pub struct LLMClient {
    client: Client,
    api_key: String,
    settings: Settings,
}

impl LLMClient {
    pub fn new(api_key: String, settings: Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.http.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            settings,
        }
    }

    pub async fn chat(&self, messages: &[ChatMessage]) -> ClientResult<String> {
        let request = ChatRequest {
            model: &self.settings.llm.model,
            messages,
            max_tokens: self.settings.llm.max_tokens,
            temperature: self.settings.llm.temperature,
        };
        let endpoint = format!(
            "{}/chat/completions",
            self.settings.llm.api_base.trim_end_matches('/')
        );

        const BASE_DELAY_MS: u64 = 500;
        let attempts = self.settings.llm.max_retries + 1;

        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = BASE_DELAY_MS * 2_u64.pow(attempt - 1);
                tracing::warn!(
                    "[LLMClient] Retrying API call (attempt {}/{}) after {}ms delay",
                    attempt + 1,
                    attempts,
                    delay
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            tracing::debug!("[LLMClient] POST {} (model {})", endpoint, request.model);

            let response = match self
                .client
                .post(&endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!("[LLMClient] HTTP request failed: {}", e);
                    last_error = Some(ClientError::from(e));
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                tracing::warn!("[LLMClient] API returned error status {}: {}", status, body);
                last_error = Some(ClientError::Api {
                    status: status.as_u16(),
                    body,
                });
                continue;
            }

            let chat_response = match response.json::<ChatResponse>().await {
                Ok(cr) => cr,
                Err(e) => {
                    tracing::warn!("[LLMClient] Failed to decode response body: {}", e);
                    last_error = Some(ClientError::Parse(e.to_string()));
                    continue;
                }
            };

            return chat_response
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| ClientError::Parse("response contained no choices".to_string()));
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Network("all retry attempts failed".to_string())))
    }
}

#[async_trait]
impl TextCompletion for LLMClient {
    async fn complete(&self, prompt: &str) -> ClientResult<String> {
        self.chat(&[ChatMessage::user(prompt)]).await
    }
}

/// Stand-in used when no completion backend is configured; every call fails.
pub struct UnavailableCompletion;

#[async_trait]
impl TextCompletion for UnavailableCompletion {
    async fn complete(&self, _prompt: &str) -> ClientResult<String> {
        Err(ClientError::NotConfigured(
            "no text-completion backend: set OPENAI_API_KEY or Cloudflare credentials"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, max_retries: u32) -> LLMClient {
        let mut settings = Settings::default();
        settings.llm.api_base = server.uri();
        settings.llm.max_retries = max_retries;
        LLMClient::new("sk-test".to_string(), settings)
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi!"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 0);
        assert_eq!(client.complete("hello").await.unwrap(), "Hi!");
    }

    #[tokio::test]
    async fn test_error_status_is_reported_without_retry_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, 0);
        match client.complete("hello").await {
            Err(ClientError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_retries_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, 1);
        assert!(client.complete("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_choices_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, 0);
        assert!(matches!(
            client.complete("hello").await,
            Err(ClientError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_unavailable_completion_always_fails() {
        assert!(matches!(
            UnavailableCompletion.complete("x").await,
            Err(ClientError::NotConfigured(_))
        ));
    }
}
