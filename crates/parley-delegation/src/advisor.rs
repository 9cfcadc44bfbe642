//! The delegation advisor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use parley_analytics::{InteractionPattern, ScenarioContext};

use crate::profile::AgentProfile;

/// Minimum overall score for a profile to appear among the candidates.
const CANDIDATE_FLOOR: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationSuggestion {
    pub suggested_agents: Vec<String>,
    pub reasoning: Vec<String>,
    pub confidence: f32,
    pub context_match: BTreeMap<String, f32>,
}

impl DelegationSuggestion {
    /// The fail-closed default: no opinion is a valid steady state, not an
    /// error.
    pub fn insufficient_context(detail: &str) -> Self {
        Self {
            suggested_agents: Vec::new(),
            reasoning: vec![format!("insufficient context: {}", detail)],
            confidence: 0.0,
            context_match: BTreeMap::new(),
        }
    }
}

pub struct DelegationAdvisor {
    profiles: Vec<AgentProfile>,
}

impl DelegationAdvisor {
    pub fn new(profiles: Vec<AgentProfile>) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &[AgentProfile] {
        &self.profiles
    }

    /// Score every registered profile against the live context. Returns the
    /// zero-confidence result when either input is missing.
    pub fn suggestions(
        &self,
        scenario: Option<&ScenarioContext>,
        pattern: Option<&InteractionPattern>,
    ) -> DelegationSuggestion {
        let (Some(scenario), Some(pattern)) = (scenario, pattern) else {
            return DelegationSuggestion::insufficient_context(
                "scenario context and interaction pattern are both required",
            );
        };

        if self.profiles.is_empty() {
            return DelegationSuggestion::insufficient_context("no agent profiles registered");
        }

        let mut ranked: Vec<(f32, &AgentProfile, BTreeMap<String, f32>)> = self
            .profiles
            .iter()
            .map(|profile| {
                let factors = score_profile(profile, scenario, pattern);
                let overall = factors.values().sum::<f32>() / factors.len() as f32;
                (overall, profile, factors)
            })
            .collect();

        // Stable sort keeps registration order among equal scores.
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let (confidence, best, context_match) = {
            let (score, profile, factors) = &ranked[0];
            (*score, (*profile).clone(), factors.clone())
        };

        let suggested_agents: Vec<String> = ranked
            .iter()
            .filter(|(score, _, _)| *score >= CANDIDATE_FLOOR)
            .map(|(_, profile, _)| profile.name.clone())
            .collect();

        let mut reasoning: Vec<String> = context_match
            .iter()
            .map(|(factor, score)| {
                format!("{}: {:.2} for \"{}\"", factor, score, best.name)
            })
            .collect();
        reasoning.push(format!(
            "\"{}\" ranked first of {} profiles for domain \"{}\"",
            best.name,
            ranked.len(),
            scenario.domain
        ));

        debug!(
            best = %best.name,
            confidence,
            candidates = suggested_agents.len(),
            "delegation scored"
        );

        DelegationSuggestion {
            suggested_agents,
            reasoning,
            confidence,
            context_match,
        }
    }
}

fn score_profile(
    profile: &AgentProfile,
    scenario: &ScenarioContext,
    pattern: &InteractionPattern,
) -> BTreeMap<String, f32> {
    let mut factors = BTreeMap::new();

    let domain_alignment = if profile.domains.iter().any(|d| d == &scenario.domain) {
        1.0
    } else if profile.domains.iter().any(|d| d == "general") {
        0.6
    } else {
        0.2
    };
    factors.insert("domain_alignment".to_string(), domain_alignment);

    let capability_coverage = if scenario.required_capabilities.is_empty() {
        1.0
    } else {
        let covered = scenario
            .required_capabilities
            .iter()
            .filter(|needed| profile.capabilities.contains(needed))
            .count();
        covered as f32 / scenario.required_capabilities.len() as f32
    };
    factors.insert("capability_coverage".to_string(), capability_coverage);

    let complexity_fit = if profile.max_complexity >= scenario.complexity {
        1.0
    } else {
        0.4
    };
    factors.insert("complexity_fit".to_string(), complexity_fit);

    let intent_alignment = match pattern.primary_intent.as_deref() {
        Some(primary) => {
            if scenario.intents.iter().any(|i| i.as_str() == primary) {
                1.0
            } else {
                0.5
            }
        }
        None => 0.7,
    };
    factors.insert("intent_alignment".to_string(), intent_alignment);

    factors
}
