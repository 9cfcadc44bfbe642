//! Delegation scoring for Parley
//!
//! Scores registered agent personas against the current scenario context
//! and interaction pattern, and gates autonomous switches behind hard
//! thresholds. With either input missing the advisor fails closed: zero
//! confidence, no candidates.

mod advisor;
mod gate;
mod profile;

pub use advisor::{DelegationAdvisor, DelegationSuggestion};
pub use gate::{
    evaluate_auto_delegation, GateDecision, GateRejection, MIN_CONFIDENCE, MIN_FACTOR_SCORE,
    MIN_REASONING,
};
pub use profile::AgentProfile;
