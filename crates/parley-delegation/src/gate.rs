//! Hard gate for autonomous agent switches
//!
//! The gate is caller-side policy: the advisor only scores, the session
//! decides. Manual switches never pass through here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisor::DelegationSuggestion;

pub const MIN_CONFIDENCE: f32 = 0.95;
pub const MIN_REASONING: usize = 3;
pub const MIN_FACTOR_SCORE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRejection {
    pub confidence: f32,
    pub reasoning_count: usize,
    /// Every context-match factor at or below the per-factor threshold,
    /// with its actual value, so near-misses stay diagnosable.
    pub failing_factors: Vec<(String, f32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Approved,
    Rejected(GateRejection),
}

impl GateDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// A switch is permitted only when confidence exceeds 0.95, reasoning has
/// at least three entries, and every context-match factor exceeds 0.9.
/// All three must hold simultaneously.
pub fn evaluate_auto_delegation(suggestion: &DelegationSuggestion) -> GateDecision {
    let failing_factors: Vec<(String, f32)> = suggestion
        .context_match
        .iter()
        .filter(|(_, score)| **score <= MIN_FACTOR_SCORE)
        .map(|(name, score)| (name.clone(), *score))
        .collect();

    let approved = suggestion.confidence > MIN_CONFIDENCE
        && suggestion.reasoning.len() >= MIN_REASONING
        && failing_factors.is_empty();

    if approved {
        GateDecision::Approved
    } else {
        debug!(
            confidence = suggestion.confidence,
            reasoning_count = suggestion.reasoning.len(),
            failing_factors = failing_factors.len(),
            "auto-delegation rejected"
        );
        GateDecision::Rejected(GateRejection {
            confidence: suggestion.confidence,
            reasoning_count: suggestion.reasoning.len(),
            failing_factors,
        })
    }
}
