//! The per-session scenario tracker

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use parley_analysis::analyze;

use crate::context::ScenarioContext;
use crate::events::{AnalyticsEvent, EventCategory, EventMetadata, EventPayload};
use crate::pattern::{merge_pattern, InteractionPattern, PatternPatch};
use crate::projection::OutcomeProjection;

/// Insight readers only ever consume the newest slice of the event log.
pub const RECENT_EVENT_WINDOW: usize = 50;

/// Read-only snapshot for display and for the delegation advisor.
#[derive(Debug, Clone)]
pub struct Insights {
    pub interaction_insights: Option<InteractionPattern>,
    pub outcome_insights: Vec<OutcomeProjection>,
    pub recent_events: Vec<AnalyticsEvent>,
}

pub struct ScenarioContextTracker {
    session_id: Uuid,
    current_agent: RwLock<Option<String>>,
    scenario_context: RwLock<Option<ScenarioContext>>,
    interaction_pattern: RwLock<Option<InteractionPattern>>,
    projections: RwLock<Vec<OutcomeProjection>>,
    events: RwLock<Vec<AnalyticsEvent>>,
}

impl ScenarioContextTracker {
    /// Mints the session id; one tracker per live session.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            current_agent: RwLock::new(None),
            scenario_context: RwLock::new(None),
            interaction_pattern: RwLock::new(None),
            projections: RwLock::new(Vec::new()),
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_agent(&self) -> Option<String> {
        self.current_agent.read().clone()
    }

    pub fn scenario_context(&self) -> Option<ScenarioContext> {
        self.scenario_context.read().clone()
    }

    pub fn interaction_pattern(&self) -> Option<InteractionPattern> {
        self.interaction_pattern.read().clone()
    }

    /// Analyze the utterance and replace — never merge — the current
    /// scenario context.
    pub fn update_scenario_context(&self, content: &str) -> ScenarioContext {
        let signals = analyze(content);
        let context = ScenarioContext::from_signals(&signals);

        let previous = {
            let mut current = self.scenario_context.write();
            current.replace(context.clone())
        };

        self.log_system(EventPayload::ScenarioContextUpdated {
            previous,
            analysis: signals,
        });

        context
    }

    pub fn set_current_agent(&self, agent: impl Into<String>) {
        let agent = agent.into();
        *self.current_agent.write() = Some(agent.clone());
        self.log_system(EventPayload::AgentContextUpdated { agent });
    }

    /// Shallow-merge the patch into the current pattern (created if absent)
    /// and return the new record.
    pub fn update_interaction_patterns(&self, patch: PatternPatch) -> InteractionPattern {
        let merged = {
            let mut current = self.interaction_pattern.write();
            let previous = current.take().unwrap_or_default();
            let merged = merge_pattern(&previous, &patch);
            *current = Some(merged.clone());
            merged
        };

        self.log_interaction(EventPayload::InteractionPatternsUpdated {
            patch,
            patterns: merged.clone(),
        });

        merged
    }

    pub fn add_outcome_projection(&self, projection: OutcomeProjection) {
        let (total, all) = {
            let mut projections = self.projections.write();
            projections.push(projection.clone());
            (projections.len(), projections.clone())
        };

        self.log_outcome(EventPayload::OutcomeProjected {
            projection,
            total_projections: total,
            projections: all,
        });
    }

    pub fn log_system(&self, payload: EventPayload) {
        self.push_event(EventCategory::System, payload);
    }

    pub fn log_interaction(&self, payload: EventPayload) {
        self.push_event(EventCategory::Interaction, payload);
    }

    pub fn log_outcome(&self, payload: EventPayload) {
        self.push_event(EventCategory::Outcome, payload);
    }

    pub fn insights(&self) -> Insights {
        let events = self.events.read();
        let start = events.len().saturating_sub(RECENT_EVENT_WINDOW);

        Insights {
            interaction_insights: self.interaction_pattern.read().clone(),
            outcome_insights: self.projections.read().clone(),
            recent_events: events[start..].to_vec(),
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    fn metadata(&self) -> EventMetadata {
        EventMetadata {
            session_id: self.session_id,
            agent_name: self.current_agent.read().clone(),
            contextual_goals: self
                .projections
                .read()
                .iter()
                .map(|p| p.immediate_goal.clone())
                .collect(),
            scenario_context: self.scenario_context.read().clone(),
        }
    }

    fn push_event(&self, category: EventCategory, payload: EventPayload) {
        debug!(session = %self.session_id, ?category, "analytics event");
        self.events.write().push(AnalyticsEvent {
            timestamp: chrono::Utc::now(),
            category,
            payload,
            metadata: self.metadata(),
        });
    }
}

impl Default for ScenarioContextTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(
            ScenarioContextTracker::new().session_id(),
            ScenarioContextTracker::new().session_id()
        );
    }

    #[test]
    fn test_update_replaces_context_wholesale() {
        let tracker = ScenarioContextTracker::new();

        tracker.update_scenario_context("the server code has a bug");
        assert_eq!(tracker.scenario_context().unwrap().domain, "technology");

        tracker.update_scenario_context("plan a trip with a flight and hotel");
        let context = tracker.scenario_context().unwrap();
        assert_eq!(context.domain, "travel");
        // Nothing from the previous context survives the replacement.
        assert!(!context
            .required_capabilities
            .contains(&"technical_support".to_string()));
    }

    #[test]
    fn test_update_logs_event_with_previous_snapshot() {
        let tracker = ScenarioContextTracker::new();
        tracker.update_scenario_context("the server code has a bug");
        tracker.update_scenario_context("plan a trip");

        let insights = tracker.insights();
        let last = insights.recent_events.last().unwrap();
        assert_eq!(last.category, EventCategory::System);
        match &last.payload {
            EventPayload::ScenarioContextUpdated { previous, .. } => {
                assert_eq!(previous.as_ref().unwrap().domain, "technology");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_set_current_agent_tags_later_events() {
        let tracker = ScenarioContextTracker::new();
        tracker.set_current_agent("concierge");
        tracker.update_scenario_context("hello");

        let insights = tracker.insights();
        let last = insights.recent_events.last().unwrap();
        assert_eq!(last.metadata.agent_name.as_deref(), Some("concierge"));
    }

    #[test]
    fn test_pattern_update_creates_then_merges() {
        let tracker = ScenarioContextTracker::new();
        assert!(tracker.interaction_pattern().is_none());

        tracker.update_interaction_patterns(PatternPatch {
            primary_intent: Some("information_seeking".to_string()),
            ..Default::default()
        });
        let merged = tracker.update_interaction_patterns(PatternPatch {
            secondary_intent: Some("action_request".to_string()),
            ..Default::default()
        });

        assert_eq!(merged.primary_intent.as_deref(), Some("information_seeking"));
        assert_eq!(merged.secondary_intent.as_deref(), Some("action_request"));
    }

    #[test]
    fn test_outcome_projection_metadata_accumulates_goals() {
        let tracker = ScenarioContextTracker::new();
        tracker.add_outcome_projection(OutcomeProjection::new("first goal"));
        tracker.add_outcome_projection(OutcomeProjection::new("second goal"));

        let insights = tracker.insights();
        assert_eq!(insights.outcome_insights.len(), 2);

        let last = insights.recent_events.last().unwrap();
        assert_eq!(last.category, EventCategory::Outcome);
        assert_eq!(
            last.metadata.contextual_goals,
            vec!["first goal", "second goal"]
        );
        match &last.payload {
            EventPayload::OutcomeProjected {
                total_projections,
                projections,
                ..
            } => {
                assert_eq!(*total_projections, 2);
                assert_eq!(projections.len(), 2);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_insights_window_caps_at_fifty() {
        let tracker = ScenarioContextTracker::new();
        for i in 0..60 {
            tracker.add_outcome_projection(OutcomeProjection::new(format!("goal {}", i)));
        }

        assert_eq!(tracker.event_count(), 60);
        let insights = tracker.insights();
        assert_eq!(insights.recent_events.len(), RECENT_EVENT_WINDOW);
        // Oldest entries fall outside the window, newest stay.
        match &insights.recent_events.last().unwrap().payload {
            EventPayload::OutcomeProjected { projection, .. } => {
                assert_eq!(projection.immediate_goal, "goal 59");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_interaction_event_carries_live_pattern_snapshot() {
        let tracker = ScenarioContextTracker::new();
        tracker.update_interaction_patterns(PatternPatch {
            primary_intent: Some("information_seeking".to_string()),
            ..Default::default()
        });

        let insights = tracker.insights();
        let last = insights.recent_events.last().unwrap();
        assert_eq!(last.category, EventCategory::Interaction);
        match &last.payload {
            EventPayload::InteractionPatternsUpdated { patterns, .. } => {
                assert_eq!(patterns.primary_intent.as_deref(), Some("information_seeking"));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }
}
