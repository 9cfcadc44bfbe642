//! MemoryChain: the bounded per-session message history

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use parley_core::{ChatMessage, Result, Role, message::format_role};

use super::context::MemoryContext;
use super::summarizer::Summarizer;

pub const DEFAULT_SUMMARY_PROMPT: &str =
    "Summarize the following conversation concisely, preserving decisions, \
     facts, and open questions that matter for continuing it:";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryChainConfig {
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    #[serde(default = "default_summarize_threshold")]
    pub summarize_threshold: usize,

    #[serde(default = "default_summary_prompt")]
    pub summary_prompt: String,
}

fn default_max_messages() -> usize {
    10
}

fn default_summarize_threshold() -> usize {
    5
}

fn default_summary_prompt() -> String {
    DEFAULT_SUMMARY_PROMPT.to_string()
}

impl Default for MemoryChainConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            summarize_threshold: default_summarize_threshold(),
            summary_prompt: default_summary_prompt(),
        }
    }
}

pub struct MemoryChain {
    messages: RwLock<Vec<ChatMessage>>,
    summary: RwLock<Option<String>>,
    key_points: RwLock<Vec<String>>,
    last_summarized_at: RwLock<DateTime<Utc>>,
    config: MemoryChainConfig,
    summarizer: Arc<dyn Summarizer>,
}

impl MemoryChain {
    pub fn new(summarizer: Arc<dyn Summarizer>, config: MemoryChainConfig) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            summary: RwLock::new(None),
            key_points: RwLock::new(Vec::new()),
            last_summarized_at: RwLock::new(Utc::now()),
            config,
            summarizer,
        }
    }

    pub fn with_default_config(summarizer: Arc<dyn Summarizer>) -> Self {
        Self::new(summarizer, MemoryChainConfig::default())
    }

    pub fn config(&self) -> &MemoryChainConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> Option<String> {
        self.summary.read().clone()
    }

    pub fn last_summarized_at(&self) -> DateTime<Utc> {
        *self.last_summarized_at.read()
    }

    /// Append a message. Summarization runs first when the pre-trim length
    /// reaches the threshold; only then is the history trimmed to the cap,
    /// oldest first. Invariant on return: `len() <= max_messages`.
    pub async fn add_message(&self, message: ChatMessage) -> Result<()> {
        let pre_trim_len = {
            let mut messages = self.messages.write();
            messages.push(message);
            messages.len()
        };

        if pre_trim_len >= self.config.summarize_threshold {
            self.summarize_conversation().await?;
        }

        let mut messages = self.messages.write();
        if messages.len() > self.config.max_messages {
            let excess = messages.len() - self.config.max_messages;
            messages.drain(..excess);
            debug!(dropped = excess, retained = messages.len(), "trimmed history");
        }

        Ok(())
    }

    /// Summarize the window starting at the first non-system message.
    /// No-op when that window is empty.
    pub async fn summarize_conversation(&self) -> Result<()> {
        let window: Vec<ChatMessage> = {
            let messages = self.messages.read();
            match messages.iter().position(|m| m.role != Role::System) {
                Some(start) => messages[start..].to_vec(),
                None => return Ok(()),
            }
        };

        let prompt = format!("{}\n\n{}", self.config.summary_prompt, flatten(&window));
        let summary = self.summarizer.summarize(&prompt, &window).await?;

        let key_points: Vec<String> = window
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.content.chars().take(100).collect())
            .collect();

        debug!(
            window = window.len(),
            key_points = key_points.len(),
            "summarized conversation"
        );

        *self.summary.write() = Some(summary);
        *self.key_points.write() = key_points;
        *self.last_summarized_at.write() = Utc::now();

        Ok(())
    }

    /// Cloned snapshot; callers cannot mutate chain state through it.
    pub fn context(&self) -> MemoryContext {
        MemoryContext {
            messages: self.messages.read().clone(),
            summary: self.summary.read().clone(),
            key_points: self.key_points.read().clone(),
        }
    }

    pub fn formatted_context(&self) -> String {
        self.context().formatted()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
        *self.summary.write() = None;
        self.key_points.write().clear();
        *self.last_summarized_at.write() = Utc::now();
    }
}

fn flatten(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", format_role(&m.role), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::PlaceholderSummarizer;

    fn chain(max_messages: usize, summarize_threshold: usize) -> MemoryChain {
        MemoryChain::new(
            Arc::new(PlaceholderSummarizer),
            MemoryChainConfig {
                max_messages,
                summarize_threshold,
                summary_prompt: DEFAULT_SUMMARY_PROMPT.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_add_and_snapshot() {
        let chain = chain(10, 5);
        chain.add_message(ChatMessage::user("hello")).await.unwrap();
        chain
            .add_message(ChatMessage::assistant("hi there"))
            .await
            .unwrap();

        let ctx = chain.context();
        assert_eq!(ctx.messages.len(), 2);
        assert_eq!(ctx.messages[0].content, "hello");
        assert!(ctx.summary.is_none());
    }

    #[tokio::test]
    async fn test_summarize_triggers_at_threshold_then_cap_holds() {
        let chain = chain(10, 5);

        for i in 0..4 {
            chain
                .add_message(ChatMessage::user(format!("msg{}", i)))
                .await
                .unwrap();
        }
        assert!(chain.summary().is_none());

        chain.add_message(ChatMessage::user("msg4")).await.unwrap();
        assert!(chain.summary().is_some());

        chain.add_message(ChatMessage::user("msg5")).await.unwrap();
        assert_eq!(chain.len(), 6);
    }

    #[tokio::test]
    async fn test_len_never_exceeds_cap() {
        let chain = chain(10, 5);

        for i in 0..25 {
            chain
                .add_message(ChatMessage::user(format!("msg{}", i)))
                .await
                .unwrap();
            assert!(chain.len() <= 10, "cap breached at message {}", i);
        }

        let ctx = chain.context();
        assert_eq!(ctx.messages.len(), 10);
        assert_eq!(ctx.messages[0].content, "msg15");
        assert_eq!(ctx.messages[9].content, "msg24");
    }

    #[tokio::test]
    async fn test_trim_drops_oldest_including_system_message() {
        let chain = chain(3, 100);

        chain
            .add_message(ChatMessage::system("you are helpful"))
            .await
            .unwrap();
        for i in 0..3 {
            chain
                .add_message(ChatMessage::user(format!("msg{}", i)))
                .await
                .unwrap();
        }

        let ctx = chain.context();
        assert_eq!(ctx.messages.len(), 3);
        assert!(ctx.messages.iter().all(|m| m.role != Role::System));
    }

    #[tokio::test]
    async fn test_summarize_skips_system_only_history() {
        let chain = chain(10, 1);

        chain
            .add_message(ChatMessage::system("you are helpful"))
            .await
            .unwrap();

        assert!(chain.summary().is_none());
    }

    #[tokio::test]
    async fn test_summarize_window_starts_after_system_message() {
        let chain = chain(10, 3);

        chain
            .add_message(ChatMessage::system("you are helpful"))
            .await
            .unwrap();
        chain.add_message(ChatMessage::user("question")).await.unwrap();
        chain
            .add_message(ChatMessage::assistant("a rather long answer to the question"))
            .await
            .unwrap();

        // Placeholder counts only the non-system window.
        assert!(chain.summary().unwrap().contains("2 messages"));
    }

    #[tokio::test]
    async fn test_key_points_from_assistant_messages() {
        let chain = chain(10, 2);

        let long_answer = "x".repeat(250);
        chain.add_message(ChatMessage::user("q1")).await.unwrap();
        chain
            .add_message(ChatMessage::assistant(long_answer))
            .await
            .unwrap();

        let ctx = chain.context();
        assert_eq!(ctx.key_points.len(), 1);
        assert_eq!(ctx.key_points[0].chars().count(), 100);
    }

    #[tokio::test]
    async fn test_formatted_context_empty_before_summarization() {
        let chain = chain(10, 5);
        chain.add_message(ChatMessage::user("hi")).await.unwrap();
        assert_eq!(chain.formatted_context(), "");
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let chain = chain(10, 2);
        chain.add_message(ChatMessage::user("q")).await.unwrap();
        chain.add_message(ChatMessage::assistant("a")).await.unwrap();
        assert!(chain.summary().is_some());

        let stamped = chain.last_summarized_at();
        chain.clear();

        assert!(chain.is_empty());
        assert!(chain.summary().is_none());
        assert!(chain.formatted_context().is_empty());
        assert!(chain.last_summarized_at() >= stamped);
    }

    #[test]
    fn test_config_defaults() {
        let config = MemoryChainConfig::default();
        assert_eq!(config.max_messages, 10);
        assert_eq!(config.summarize_threshold, 5);
        assert_eq!(config.summary_prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_config_yaml_defaults_fill_in() {
        let config: MemoryChainConfig = serde_yaml::from_str("max_messages: 20").unwrap();
        assert_eq!(config.max_messages, 20);
        assert_eq!(config.summarize_threshold, 5);
        assert_eq!(config.summary_prompt, DEFAULT_SUMMARY_PROMPT);
    }

    #[test]
    fn test_flatten_renders_role_prefixes() {
        let rendered = flatten(&[ChatMessage::user("hi"), ChatMessage::assistant("hello")]);
        assert_eq!(rendered, "User: hi\nAssistant: hello");
    }
}
