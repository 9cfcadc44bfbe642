//! OpenAI-style chat-completions backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parley_core::{
    ChatMessage, ClientError, CompletionBackend, CompletionConfig, ResponseFormat, Role,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize, Deserialize, Clone, Debug)]
struct WireMessage {
    role: Role,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<WireMessage>,
}

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    default_config: CompletionConfig,
}

impl HttpBackend {
    pub fn new(
        api_key: impl Into<String>,
        default_config: CompletionConfig,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            default_config,
        }
    }

    /// Reads the key from `OPENAI_API_KEY`.
    pub fn from_env(default_config: CompletionConfig) -> Result<Self, ClientError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ClientError::Config("API key not found in environment variable OPENAI_API_KEY".into())
        })?;
        Ok(Self::new(api_key, default_config))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(
        &self,
        messages: &[ChatMessage],
        config: Option<&CompletionConfig>,
    ) -> ChatCompletionRequest {
        let config = config.unwrap_or(&self.default_config);
        ChatCompletionRequest {
            model: config.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            response_format: config.response_format,
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: Option<&CompletionConfig>,
    ) -> Result<ChatMessage, ClientError> {
        let request = self.build_request(messages, config);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, messages = request.messages.len(), "sending completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                message: body,
                status: Some(status.as_u16()),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

        let message = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .ok_or_else(|| {
                ClientError::MalformedResponse("missing choices[0].message".to_string())
            })?;

        Ok(ChatMessage::assistant(message.content))
    }

    fn backend_name(&self) -> &str {
        "openai"
    }
}
