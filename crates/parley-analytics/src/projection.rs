//! Forward-looking outcome projections

use serde::{Deserialize, Serialize};

/// A goal/capability/risk record appended per significant step. The
/// per-session list is append-only and unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProjection {
    pub immediate_goal: String,
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_agent: Option<String>,
}

impl OutcomeProjection {
    pub fn new(immediate_goal: impl Into<String>) -> Self {
        Self {
            immediate_goal: immediate_goal.into(),
            required_capabilities: Vec::new(),
            risks: Vec::new(),
            suggested_agent: None,
        }
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.required_capabilities = capabilities;
        self
    }

    pub fn with_risks(mut self, risks: Vec<String>) -> Self {
        self.risks = risks;
        self
    }

    pub fn with_suggested_agent(mut self, agent: impl Into<String>) -> Self {
        self.suggested_agent = Some(agent.into());
        self
    }
}
