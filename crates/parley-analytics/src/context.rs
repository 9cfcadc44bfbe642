//! Scenario context derived from the latest utterance

use serde::{Deserialize, Serialize};

use parley_analysis::{
    AmbiguityFactor, Complexity, Intent, MemoryDependency, TextSignals, GENERAL_DOMAIN,
};

/// The current inferred classification of the conversation. Recomputed
/// wholesale on every utterance, never merged with its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioContext {
    pub domain: String,
    pub intents: Vec<Intent>,
    pub complexity: Complexity,
    pub required_capabilities: Vec<String>,
    pub ambiguity_factors: Vec<AmbiguityFactor>,
    pub memory_dependencies: Vec<MemoryDependency>,
}

impl ScenarioContext {
    pub fn from_signals(signals: &TextSignals) -> Self {
        let mut required_capabilities = capabilities_for_domain(&signals.domain);
        if signals.complexity == Complexity::High {
            required_capabilities.push("detailed_analysis".to_string());
            required_capabilities.push("complex_reasoning".to_string());
        }

        Self {
            domain: signals.domain.clone(),
            intents: signals.intents.clone(),
            complexity: signals.complexity,
            required_capabilities,
            ambiguity_factors: signals.ambiguity_factors.clone(),
            memory_dependencies: signals.memory_dependencies.clone(),
        }
    }
}

/// Fixed domain-to-capability mapping. Every domain contributes one or two
/// base capabilities; unknown domains fall back to general assistance.
pub fn capabilities_for_domain(domain: &str) -> Vec<String> {
    let base: &[&str] = match domain {
        "technology" => &["technical_support", "code_assistance"],
        "finance" => &["financial_guidance", "numeric_analysis"],
        "health" => &["wellness_guidance"],
        "travel" => &["trip_planning"],
        "creative" => &["creative_collaboration", "content_generation"],
        _ => &["general_assistance"],
    };
    base.iter().map(|c| c.to_string()).collect()
}
