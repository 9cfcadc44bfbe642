//! Read-only memory snapshot handed to callers

use serde::{Deserialize, Serialize};

use parley_core::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemoryContext {
    pub messages: Vec<ChatMessage>,
    pub summary: Option<String>,
    pub key_points: Vec<String>,
}

impl MemoryContext {
    /// Summary paragraph followed by a bulleted key-points block.
    /// Empty string when neither exists.
    pub fn formatted(&self) -> String {
        let mut blocks = Vec::new();

        if let Some(ref summary) = self.summary {
            blocks.push(summary.clone());
        }

        if !self.key_points.is_empty() {
            let mut points = String::from("Key points:");
            for point in &self.key_points {
                points.push_str("\n- ");
                points.push_str(point);
            }
            blocks.push(points);
        }

        blocks.join("\n\n")
    }

    /// Assemble the outbound completion request: rolling history, then a
    /// synthetic system message carrying the formatted context, then the
    /// new user turn.
    pub fn to_outbound_messages(&self, user_text: &str) -> Vec<ChatMessage> {
        let mut out = self.messages.clone();

        let formatted = self.formatted();
        if !formatted.is_empty() {
            out.push(ChatMessage::system(formatted));
        }

        out.push(ChatMessage::user(user_text));
        out
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.summary.is_none() && self.key_points.is_empty()
    }
}
