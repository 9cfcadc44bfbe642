//! Deterministic text-signal extraction for Parley
//!
//! Turns a raw utterance into intent tags, a domain classification, a
//! complexity grade, ambiguity factors, and memory-dependency hints. The
//! pipeline is pure keyword matching: identical input always yields
//! identical output.

mod extractor;
mod lexicon;
mod types;

pub use extractor::analyze;
pub use lexicon::{DomainSpec, DOMAINS, GENERAL_DOMAIN};
pub use types::{
    AmbiguityFactor, AmbiguityKind, Complexity, ImpactLevel, Intent, MemoryDependency,
    MemoryDependencyKind, Relevance, TextSignals, Timeframe,
};
