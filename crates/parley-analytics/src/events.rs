//! Typed analytics events
//!
//! Each event type carries its own payload variant; there are no free-form
//! data maps at the logging boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_analysis::TextSignals;

use crate::context::ScenarioContext;
use crate::pattern::{InteractionPattern, PatternPatch};
use crate::projection::OutcomeProjection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    System,
    Interaction,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    ScenarioContextUpdated {
        previous: Option<ScenarioContext>,
        analysis: TextSignals,
    },
    AgentContextUpdated {
        agent: String,
    },
    InteractionPatternsUpdated {
        patch: PatternPatch,
        patterns: InteractionPattern,
    },
    OutcomeProjected {
        projection: OutcomeProjection,
        total_projections: usize,
        projections: Vec<OutcomeProjection>,
    },
    DelegationRejected {
        confidence: f32,
        reasoning_count: usize,
        failing_factors: Vec<FactorScore>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub session_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub contextual_goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_context: Option<ScenarioContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub timestamp: DateTime<Utc>,
    pub category: EventCategory,
    pub payload: EventPayload,
    pub metadata: EventMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tag_serialization() {
        let payload = EventPayload::AgentContextUpdated {
            agent: "concierge".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "agent_context_updated");
        assert_eq!(json["agent"], "concierge");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&EventCategory::Interaction).unwrap();
        assert_eq!(json, "\"interaction\"");
    }

    #[test]
    fn test_delegation_rejected_round_trip() {
        let payload = EventPayload::DelegationRejected {
            confidence: 0.9,
            reasoning_count: 2,
            failing_factors: vec![FactorScore {
                name: "domain_alignment".to_string(),
                score: 0.4,
            }],
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: EventPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
