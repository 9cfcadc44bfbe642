//! Signal types produced by the extractor

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    InformationSeeking,
    ActionRequest,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InformationSeeking => "information_seeking",
            Self::ActionRequest => "action_request",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityKind {
    /// The request is hedged; its boundaries are unclear.
    Scope,
    /// The utterance points back at something it does not name.
    Reference,
    /// A domain term signals the user is uncertain within that domain.
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityFactor {
    pub kind: AmbiguityKind,
    pub description: String,
    pub impact: ImpactLevel,
    #[serde(default)]
    pub resolution_hints: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Recent,
    Historical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryDependencyKind {
    /// The utterance refers back into the live conversation window.
    ConversationContext,
    /// The utterance recalls something from an earlier exchange.
    PriorInteraction,
    /// Answering well requires accumulated domain background.
    DomainKnowledge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDependency {
    pub kind: MemoryDependencyKind,
    pub relevance: Relevance,
    pub timeframe: Timeframe,
    pub confidence: f32,
}

/// Everything the extractor derives from one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    pub intents: Vec<Intent>,
    pub domain: String,
    pub complexity: Complexity,
    pub ambiguity_factors: Vec<AmbiguityFactor>,
    pub memory_dependencies: Vec<MemoryDependency>,
}
