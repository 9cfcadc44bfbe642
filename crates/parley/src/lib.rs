//! Parley: conversation memory and context-analysis engine

pub mod analysis {
    pub use parley_analysis::{
        analyze, AmbiguityFactor, AmbiguityKind, Complexity, DomainSpec, ImpactLevel, Intent,
        MemoryDependency, MemoryDependencyKind, Relevance, TextSignals, Timeframe, DOMAINS,
        GENERAL_DOMAIN,
    };
}

pub mod analytics {
    pub use parley_analytics::{
        capabilities_for_domain, merge_pattern, AnalyticsEvent, EventCategory, EventMetadata,
        EventPayload, FactorScore, Insights, InteractionPattern, InteractionStyle, KnowledgeDepth,
        OutcomeProjection, PatternPatch, ScenarioContext, ScenarioContextTracker, UserContext,
        RECENT_EVENT_WINDOW,
    };
}

pub mod client {
    pub use parley_client::{
        ConnectionManager, ConnectionState, HttpBackend, MockBackend, RetryPolicy,
    };
}

pub mod delegation {
    pub use parley_delegation::{
        evaluate_auto_delegation, AgentProfile, DelegationAdvisor, DelegationSuggestion,
        GateDecision, GateRejection, MIN_CONFIDENCE, MIN_FACTOR_SCORE, MIN_REASONING,
    };
}

pub mod error {
    pub use parley_core::{Error, Result};
}

pub mod memory {
    pub use parley_memory::{
        LLMSummarizer, MemoryChain, MemoryChainConfig, MemoryContext, PlaceholderSummarizer,
        Summarizer, DEFAULT_SUMMARY_PROMPT,
    };
}

pub mod session {
    pub use parley_runtime::{
        ItemStatus, Session, SessionBuilder, SessionError, Transcript, TranscriptItem,
        DELTA_MIN_INTERVAL,
    };
}

// Top-level re-exports for the common path
pub use parley_analysis::{analyze, Complexity, Intent, TextSignals};
pub use parley_analytics::{
    InteractionPattern, OutcomeProjection, PatternPatch, ScenarioContext, ScenarioContextTracker,
};
pub use parley_client::{ConnectionManager, HttpBackend, MockBackend, RetryPolicy};
pub use parley_core::{
    ChatMessage, ClientError, CompletionBackend, CompletionConfig, ResponseFormat, Role,
};
pub use parley_delegation::{AgentProfile, DelegationAdvisor, DelegationSuggestion, GateDecision};
pub use parley_memory::{MemoryChain, MemoryChainConfig, PlaceholderSummarizer, Summarizer};
pub use parley_runtime::{Session, SessionBuilder, SessionError, Transcript};
