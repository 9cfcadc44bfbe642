//! Summarizer trait and implementations

use std::sync::Arc;

use async_trait::async_trait;

use parley_core::{ChatMessage, CompletionBackend, CompletionConfig, Result, Role};

/// Produces a rolling summary from the synthetic prompt assembled by the
/// chain. The window is passed alongside so non-LLM implementations can
/// derive something meaningful without parsing the prompt back apart.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str, window: &[ChatMessage]) -> Result<String>;
}

/// Default summarizer: records a deterministic textual placeholder until a
/// completion-backed summarizer is wired in.
pub struct PlaceholderSummarizer;

#[async_trait]
impl Summarizer for PlaceholderSummarizer {
    async fn summarize(&self, _prompt: &str, window: &[ChatMessage]) -> Result<String> {
        let assistant_turns = window.iter().filter(|m| m.role == Role::Assistant).count();
        Ok(format!(
            "Conversation summary pending ({} messages, {} assistant turns).",
            window.len(),
            assistant_turns
        ))
    }
}

/// Completion-backed summarizer. Same contract as the placeholder: one
/// summary string out, errors propagated to the caller.
pub struct LLMSummarizer {
    backend: Arc<dyn CompletionBackend>,
    config: Option<CompletionConfig>,
}

impl LLMSummarizer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            config: None,
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[async_trait]
impl Summarizer for LLMSummarizer {
    async fn summarize(&self, prompt: &str, window: &[ChatMessage]) -> Result<String> {
        if window.is_empty() {
            return Ok(String::new());
        }

        let messages = vec![ChatMessage::user(prompt)];
        let response = self
            .backend
            .complete(&messages, self.config.as_ref())
            .await?;
        Ok(response.content.trim().to_string())
    }
}
