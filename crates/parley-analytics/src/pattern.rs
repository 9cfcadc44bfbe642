//! Interaction patterns and their shallow-merge patch type

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeDepth {
    Surface,
    Working,
    Deep,
}

/// How the user wants answers shaped. Replaced as a unit on patch; the
/// individual fields are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionStyle {
    pub formality: String,
    pub detail: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub expertise: String,
    pub goal_clarity: String,
    pub engagement: String,
}

/// Accumulated profile of how the user is communicating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InteractionPattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_depth: Option<KnowledgeDepth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<InteractionStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

/// Partial update: a field left `None` keeps its prior value; a field set
/// here replaces the prior value wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PatternPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_depth: Option<KnowledgeDepth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<InteractionStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

/// Pure shallow merge returning a new record; the previous pattern is left
/// untouched so history stays inspectable.
pub fn merge_pattern(previous: &InteractionPattern, patch: &PatternPatch) -> InteractionPattern {
    InteractionPattern {
        primary_intent: patch
            .primary_intent
            .clone()
            .or_else(|| previous.primary_intent.clone()),
        secondary_intent: patch
            .secondary_intent
            .clone()
            .or_else(|| previous.secondary_intent.clone()),
        knowledge_depth: patch.knowledge_depth.or(previous.knowledge_depth),
        style: patch.style.clone().or_else(|| previous.style.clone()),
        user_context: patch
            .user_context
            .clone()
            .or_else(|| previous.user_context.clone()),
    }
}
