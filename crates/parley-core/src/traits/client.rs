//! Completion backend trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::ChatMessage;

/// Seam between the conversation engine and the remote completion API.
/// The engine only ever needs "messages in, one assistant message out".
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        config: Option<&CompletionConfig>,
    ) -> Result<ChatMessage, ClientError>;

    /// Reachability probe run when a session connects. Backends without a
    /// connection handshake accept by default.
    async fn connect(&self) -> Result<(), ClientError> {
        Ok(())
    }

    fn backend_name(&self) -> &str;
}

/// Per-request completion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl CompletionConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

/// Completion client error types
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not connected")]
    NotConnected,

    #[error("{attempts} attempts exhausted, last error: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Transient failures are worth another attempt; everything else
    /// (bad config, unparseable body) fails the turn immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => match status {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = CompletionConfig::new("gpt-4o-mini")
            .with_temperature(0.7)
            .with_max_tokens(512)
            .with_response_format(ResponseFormat::Text);

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    fn test_response_format_wire_shape() {
        let json = serde_json::to_string(&ResponseFormat::JsonObject).unwrap();
        assert_eq!(json, r#"{"type":"json_object"}"#);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ClientError::Network("reset".into()).is_retryable());
        assert!(
            ClientError::Api {
                message: "overloaded".into(),
                status: Some(503),
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Api {
                message: "bad request".into(),
                status: Some(400),
            }
            .is_retryable()
        );
        assert!(!ClientError::MalformedResponse("no choices".into()).is_retryable());
        assert!(!ClientError::Config("missing key".into()).is_retryable());
    }
}
