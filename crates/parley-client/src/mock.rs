//! Mock completion backend for tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use parley_core::{ChatMessage, ClientError, CompletionBackend, CompletionConfig};

/// Scripted backend: queued responses, injectable failures, call history.
#[derive(Clone)]
pub struct MockBackend {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    responses: Vec<String>,
    response_index: usize,
    cycle_responses: bool,
    call_history: Vec<Vec<ChatMessage>>,
    fail_remaining: u32,
    fail_message: String,
    fatal: bool,
    latency_ms: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                responses: vec!["mock reply".to_string()],
                response_index: 0,
                cycle_responses: true,
                call_history: Vec::new(),
                fail_remaining: 0,
                fail_message: "mock failure".to_string(),
                fatal: false,
                latency_ms: 0,
            })),
        }
    }

    pub fn with_responses(responses: Vec<String>, cycle: bool) -> Self {
        let mock = Self::new();
        {
            let mut inner = mock.inner.write();
            inner.responses = responses;
            inner.cycle_responses = cycle;
        }
        mock
    }

    /// The next `count` calls fail with a retryable network error.
    pub fn fail_times(&self, count: u32, message: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.fail_remaining = count;
        inner.fail_message = message.into();
        inner.fatal = false;
    }

    /// The next `count` calls fail with a non-retryable malformed response.
    pub fn fail_fatal(&self, count: u32, message: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.fail_remaining = count;
        inner.fail_message = message.into();
        inner.fatal = true;
    }

    pub fn set_latency(&self, latency_ms: u64) {
        self.inner.write().latency_ms = latency_ms;
    }

    pub fn call_count(&self) -> usize {
        self.inner.read().call_history.len()
    }

    pub fn last_call(&self) -> Option<Vec<ChatMessage>> {
        self.inner.read().call_history.last().cloned()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _config: Option<&CompletionConfig>,
    ) -> Result<ChatMessage, ClientError> {
        // The result is computed under the lock; the simulated latency is
        // awaited outside it.
        let (result, latency_ms) = {
            let mut inner = self.inner.write();
            inner.call_history.push(messages.to_vec());

            let result = if inner.fail_remaining > 0 {
                inner.fail_remaining -= 1;
                let message = inner.fail_message.clone();
                Err(if inner.fatal {
                    ClientError::MalformedResponse(message)
                } else {
                    ClientError::Network(message)
                })
            } else if inner.responses.is_empty() {
                Ok(ChatMessage::assistant("mock reply"))
            } else {
                let index = inner.response_index;
                let content = inner.responses[index.min(inner.responses.len() - 1)].clone();
                if index + 1 < inner.responses.len() {
                    inner.response_index += 1;
                } else if inner.cycle_responses {
                    inner.response_index = 0;
                }
                Ok(ChatMessage::assistant(content))
            };

            (result, inner.latency_ms)
        };

        if latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(latency_ms)).await;
        }

        result
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
