//! Agent persona profiles

use serde::{Deserialize, Serialize};

use parley_analysis::Complexity;

/// What one agent persona claims to be good at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default = "default_max_complexity")]
    pub max_complexity: Complexity,
}

fn default_max_complexity() -> Complexity {
    Complexity::Medium
}

impl AgentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains: Vec::new(),
            capabilities: Vec::new(),
            max_complexity: default_max_complexity(),
        }
    }

    pub fn with_domains(mut self, domains: Vec<String>) -> Self {
        self.domains = domains;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_max_complexity(mut self, max_complexity: Complexity) -> Self {
        self.max_complexity = max_complexity;
        self
    }
}
