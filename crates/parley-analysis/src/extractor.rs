//! The extraction pipeline

use tracing::debug;

use crate::lexicon::{
    DOMAINS, GENERAL_DOMAIN, HEDGING_TOKENS, INTERROGATIVES, RECALL_TOKENS, REQUEST_VERBS,
    TEMPORAL_BACKREFS,
};
use crate::types::{
    AmbiguityFactor, AmbiguityKind, Complexity, ImpactLevel, Intent, MemoryDependency,
    MemoryDependencyKind, Relevance, TextSignals, Timeframe,
};

/// Analyze one utterance. Pure and stateless: same input, same output.
pub fn analyze(content: &str) -> TextSignals {
    let tokens = tokenize(content);

    let intents = detect_intents(content, &tokens);
    let mut ambiguity_factors = Vec::new();
    let mut memory_dependencies = Vec::new();

    if intents.contains(&Intent::InformationSeeking) {
        if let Some(hedge) = tokens.iter().find(|t| HEDGING_TOKENS.contains(&t.as_str())) {
            ambiguity_factors.push(AmbiguityFactor {
                kind: AmbiguityKind::Scope,
                description: format!("hedged question (\"{}\") leaves the scope open", hedge),
                impact: ImpactLevel::Medium,
                resolution_hints: vec![
                    "ask for specific examples".to_string(),
                    "clarify scope".to_string(),
                ],
            });
        }
    }

    if tokens.iter().any(|t| TEMPORAL_BACKREFS.contains(&t.as_str())) {
        memory_dependencies.push(MemoryDependency {
            kind: MemoryDependencyKind::ConversationContext,
            relevance: Relevance::Critical,
            timeframe: Timeframe::Recent,
            confidence: 0.9,
        });
    }

    if tokens.iter().any(|t| RECALL_TOKENS.contains(&t.as_str())) {
        memory_dependencies.push(MemoryDependency {
            kind: MemoryDependencyKind::PriorInteraction,
            relevance: Relevance::Critical,
            timeframe: Timeframe::Recent,
            confidence: 0.8,
        });
        ambiguity_factors.push(AmbiguityFactor {
            kind: AmbiguityKind::Reference,
            description: "recalls an earlier exchange without naming it".to_string(),
            impact: ImpactLevel::High,
            resolution_hints: vec!["ask which earlier topic is meant".to_string()],
        });
    }

    let domain = classify_domain(&tokens, &mut ambiguity_factors);

    let complexity = score_complexity(content, &intents, &domain, ambiguity_factors.len());

    if complexity == Complexity::High {
        memory_dependencies.push(MemoryDependency {
            kind: MemoryDependencyKind::DomainKnowledge,
            relevance: Relevance::Critical,
            timeframe: Timeframe::Historical,
            confidence: 0.85,
        });
    }

    debug!(
        %domain,
        intents = intents.len(),
        complexity = ?complexity,
        ambiguity_factors = ambiguity_factors.len(),
        "analyzed utterance"
    );

    TextSignals {
        intents,
        domain,
        complexity,
        ambiguity_factors,
        memory_dependencies,
    }
}

fn tokenize(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

fn detect_intents(content: &str, tokens: &[String]) -> Vec<Intent> {
    let mut intents = Vec::new();

    let interrogative = content.contains('?')
        || tokens.iter().any(|t| INTERROGATIVES.contains(&t.as_str()));
    if interrogative {
        intents.push(Intent::InformationSeeking);
    }

    if tokens.iter().any(|t| REQUEST_VERBS.contains(&t.as_str())) {
        intents.push(Intent::ActionRequest);
    }

    intents
}

/// Weighted keyword vote over the fixed domain table. Every uncertainty
/// indicator appends a semantic factor whether or not its domain wins.
fn classify_domain(tokens: &[String], ambiguity_factors: &mut Vec<AmbiguityFactor>) -> String {
    let mut weights = vec![0u32; DOMAINS.len()];

    for token in tokens {
        for (idx, domain) in DOMAINS.iter().enumerate() {
            if domain.keywords.contains(&token.as_str()) {
                weights[idx] += 1;
            }
            if domain.uncertainty_indicators.contains(&token.as_str()) {
                ambiguity_factors.push(AmbiguityFactor {
                    kind: AmbiguityKind::Semantic,
                    description: format!("\"{}\" signals uncertainty in {}", token, domain.name),
                    impact: ImpactLevel::Medium,
                    resolution_hints: vec![format!("confirm the {} details", domain.name)],
                });
            }
        }
    }

    // Highest weight wins; ties resolve to the earliest table entry.
    let mut winner: Option<(usize, u32)> = None;
    for (idx, &weight) in weights.iter().enumerate() {
        if weight > 0 && winner.map_or(true, |(_, best)| weight > best) {
            winner = Some((idx, weight));
        }
    }

    match winner {
        Some((idx, _)) => DOMAINS[idx].name.to_string(),
        None => GENERAL_DOMAIN.to_string(),
    }
}

fn score_complexity(
    content: &str,
    intents: &[Intent],
    domain: &str,
    ambiguity_count: usize,
) -> Complexity {
    let length = content.chars().count();
    let length_score = if length > 100 {
        2
    } else if length > 50 {
        1
    } else {
        0
    };

    let intent_score = if intents.len() > 2 {
        2
    } else if intents.len() > 1 {
        1
    } else {
        0
    };

    let domain_score = if domain != GENERAL_DOMAIN { 1 } else { 0 };

    let score = length_score + intent_score + domain_score + ambiguity_count;

    if score >= 4 {
        Complexity::High
    } else if score >= 2 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}
