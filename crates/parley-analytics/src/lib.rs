//! Per-session scenario tracking and analytics for Parley
//!
//! One `ScenarioContextTracker` per session, constructed with a fresh
//! session id and passed explicitly to everything that logs — there is no
//! module-scope singleton.

mod context;
mod events;
mod pattern;
mod projection;
mod tracker;

pub use context::{capabilities_for_domain, ScenarioContext};
pub use events::{
    AnalyticsEvent, EventCategory, EventMetadata, EventPayload, FactorScore,
};
pub use pattern::{
    merge_pattern, InteractionPattern, InteractionStyle, KnowledgeDepth, PatternPatch,
    UserContext,
};
pub use projection::OutcomeProjection;
pub use tracker::{Insights, ScenarioContextTracker, RECENT_EVENT_WINDOW};
