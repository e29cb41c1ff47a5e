//! Chat-completion client for OpenAI and Azure OpenAI.
//!
//! Both providers speak the same request/response body; they differ in URL
//! layout and authentication header. Keys come from [`SecretConfig`] only.

use std::time::Duration;

use async_trait::async_trait;
use naible_core::config::{LlmProvider, LlmSettings, SecretConfig};
use reqwest::{Client, Request, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a chat-completion call.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No API key configured for provider '{0}'")]
    MissingKey(LlmProvider),
    #[error("Invalid client configuration: {0}")]
    Config(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Response contained no content")]
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

impl From<&LlmSettings> for CompletionOptions {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// A single-shot chat completion.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends `messages` and returns the first choice's text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String, ChatError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint {
    OpenAi {
        base_url: String,
    },
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

/// [`ChatCompletion`] over HTTPS.
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: Client,
    endpoint: Endpoint,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    /// Creates a client for api.openai.com-compatible endpoints.
    pub fn openai(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: Endpoint::OpenAi {
                base_url: base_url.into(),
            },
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a client for an Azure OpenAI deployment.
    pub fn azure(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let deployment = deployment.into();
        Self {
            client: Client::new(),
            model: deployment.clone(),
            endpoint: Endpoint::Azure {
                endpoint: endpoint.into(),
                deployment,
                api_version: api_version.into(),
            },
            api_key: api_key.into(),
        }
    }

    /// Builds a client from configuration.
    ///
    /// Fails with [`ChatError::MissingKey`] when the configured provider has no key.
    pub fn from_settings(settings: &LlmSettings, secrets: &SecretConfig) -> Result<Self, ChatError> {
        let api_key = secrets
            .key_for(settings.provider)
            .ok_or(ChatError::MissingKey(settings.provider))?;

        let client = match settings.provider {
            LlmProvider::OpenAi => Self::openai(&settings.endpoint, api_key, &settings.model),
            LlmProvider::Azure => Self::azure(
                &settings.endpoint,
                &settings.deployment,
                &settings.api_version,
                api_key,
            ),
        };

        client.with_timeout(Duration::from_secs(settings.timeout_secs))
    }

    /// Rebuilds the HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ChatError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))?;
        Ok(self)
    }

    pub fn provider(&self) -> LlmProvider {
        match self.endpoint {
            Endpoint::OpenAi { .. } => LlmProvider::OpenAi,
            Endpoint::Azure { .. } => LlmProvider::Azure,
        }
    }

    fn url(&self) -> String {
        match &self.endpoint {
            Endpoint::OpenAi { base_url } => {
                format!("{}/chat/completions", base_url.trim_end_matches('/'))
            }
            Endpoint::Azure {
                endpoint,
                deployment,
                ..
            } => format!(
                "{}/openai/deployments/{}/chat/completions",
                endpoint.trim_end_matches('/'),
                deployment
            ),
        }
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<Request, ChatError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let builder = self.client.post(self.url()).json(&body);
        let builder = match &self.endpoint {
            Endpoint::OpenAi { .. } => builder.bearer_auth(&self.api_key),
            Endpoint::Azure { api_version, .. } => builder
                .query(&[("api-version", api_version.as_str())])
                .header("api-key", &self.api_key),
        };

        builder
            .build()
            .map_err(|e| ChatError::Config(e.to_string()))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String, ChatError> {
        let request = self.build_request(messages, options)?;
        tracing::debug!(
            provider = %self.provider(),
            model = %self.model,
            messages = messages.len(),
            "[Chat] Sending completion request"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Decode(e.to_string()))?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, ChatError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ChatError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> ChatError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    ChatError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use naible_core::config::ApiKeyConfig;

    fn body_json(request: &Request) -> serde_json::Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_openai_request_shape() {
        let client = OpenAiChatClient::openai("https://api.openai.com/v1/", "sk-test", "gpt-4o");
        let request = client
            .build_request(&[ChatMessage::user("hi")], CompletionOptions::default())
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer sk-test"
        );
        assert!(request.headers().get("api-key").is_none());

        let body = body_json(&request);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_azure_request_shape() {
        let client = OpenAiChatClient::azure(
            "https://res.openai.azure.com/",
            "gpt-4.1",
            "2025-01-01-preview",
            "az-key",
        );
        let request = client
            .build_request(&[ChatMessage::system("s")], CompletionOptions::default())
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://res.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2025-01-01-preview"
        );
        assert_eq!(request.headers().get("api-key").unwrap(), "az-key");
        assert!(request.headers().get("authorization").is_none());
        assert_eq!(body_json(&request)["model"], "gpt-4.1");
    }

    #[test]
    fn test_from_settings_requires_key() {
        let settings = LlmSettings::default();
        let err = OpenAiChatClient::from_settings(&settings, &SecretConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ChatError::MissingKey(LlmProvider::OpenAi)));

        let secrets = SecretConfig {
            openai: Some(ApiKeyConfig::new("sk-1")),
            azure: None,
        };
        let client = OpenAiChatClient::from_settings(&settings, &secrets).unwrap();
        assert_eq!(client.provider(), LlmProvider::OpenAi);
    }

    #[test]
    fn test_error_body_message_extracted() {
        let err = map_http_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#
                .to_string(),
        );
        assert_eq!(err.to_string(), "HTTP 401: Incorrect API key provided");

        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "HTTP 502: upstream down");
    }

    #[test]
    fn test_empty_choice_is_an_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(matches!(
            extract_text_response(parsed),
            Err(ChatError::EmptyResponse)
        ));

        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_text_response(parsed),
            Err(ChatError::EmptyResponse)
        ));
    }
}
