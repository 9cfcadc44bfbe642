//! Session: the per-conversation control flow

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use parley_analytics::{EventPayload, FactorScore, Insights, ScenarioContextTracker};
use parley_client::{ConnectionManager, MockBackend, RetryPolicy};
use parley_core::{ChatMessage, ClientError, CompletionBackend, CompletionConfig};
use parley_delegation::{
    evaluate_auto_delegation, AgentProfile, DelegationAdvisor, DelegationSuggestion, GateDecision,
};
use parley_memory::{MemoryChain, MemoryChainConfig, MemoryContext, PlaceholderSummarizer};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// A second send while one is outstanding is rejected, never queued.
    #[error("a turn is already in flight")]
    TurnInFlight,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Core(#[from] parley_core::Error),
}

pub struct Session {
    tracker: Arc<ScenarioContextTracker>,
    chain: Arc<MemoryChain>,
    advisor: DelegationAdvisor,
    connection: Arc<ConnectionManager>,
    completion_config: Option<CompletionConfig>,
    in_flight: AtomicBool,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn tracker(&self) -> &ScenarioContextTracker {
        &self.tracker
    }

    pub fn chain(&self) -> &MemoryChain {
        &self.chain
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub async fn connect(&self) -> Result<(), SessionError> {
        self.connection.connect().await?;
        Ok(())
    }

    pub fn disconnect(&self) {
        self.connection.disconnect();
    }

    /// One conversation turn: analyze, remember, assemble, send, record the
    /// reply. On any send failure the user message stays recorded and no
    /// assistant message is appended.
    pub async fn send_user_message(&self, text: &str) -> Result<ChatMessage, SessionError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SessionError::TurnInFlight);
        }

        let result = self.run_turn(text).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_turn(&self, text: &str) -> Result<ChatMessage, SessionError> {
        self.tracker.update_scenario_context(text);

        self.chain.add_message(ChatMessage::user(text)).await?;

        // The chain now holds the user turn and any summary it triggered.
        // The outbound list puts the live user turn after the context block,
        // so it is peeled off the rolling history first.
        let context = self.chain.context();
        let mut history = context.messages.clone();
        history.pop();
        let outbound = MemoryContext {
            messages: history,
            summary: context.summary.clone(),
            key_points: context.key_points.clone(),
        }
        .to_outbound_messages(text);

        debug!(outbound = outbound.len(), "sending turn");
        let reply = self
            .connection
            .send_message(&outbound, self.completion_config.as_ref())
            .await?;

        self.chain
            .add_message(ChatMessage::assistant(reply.content.clone()))
            .await?;

        Ok(reply)
    }

    pub fn delegation_suggestions(&self) -> DelegationSuggestion {
        self.advisor.suggestions(
            self.tracker.scenario_context().as_ref(),
            self.tracker.interaction_pattern().as_ref(),
        )
    }

    /// Manual switches take effect immediately; a live connection is torn
    /// down first.
    pub fn switch_agent_manual(&self, agent: impl Into<String>) {
        if self.connection.is_connected() {
            self.connection.disconnect();
        }
        let agent = agent.into();
        info!(agent = %agent, "manual agent switch");
        self.tracker.set_current_agent(agent);
    }

    /// Consult the advisor and apply the auto-delegation gate. Rejections
    /// are logged with the exact values that failed.
    pub fn try_auto_switch(&self) -> GateDecision {
        let suggestion = self.delegation_suggestions();
        let decision = evaluate_auto_delegation(&suggestion);

        match &decision {
            GateDecision::Approved => {
                if let Some(agent) = suggestion.suggested_agents.first() {
                    info!(agent = %agent, "auto agent switch approved");
                    self.tracker.set_current_agent(agent.clone());
                }
            }
            GateDecision::Rejected(rejection) => {
                self.tracker.log_system(EventPayload::DelegationRejected {
                    confidence: rejection.confidence,
                    reasoning_count: rejection.reasoning_count,
                    failing_factors: rejection
                        .failing_factors
                        .iter()
                        .map(|(name, score)| FactorScore {
                            name: name.clone(),
                            score: *score,
                        })
                        .collect(),
                });
            }
        }

        decision
    }

    pub fn insights(&self) -> Insights {
        self.tracker.insights()
    }
}

pub struct SessionBuilder {
    backend: Option<Arc<dyn CompletionBackend>>,
    retry: RetryPolicy,
    memory_config: MemoryChainConfig,
    completion_config: Option<CompletionConfig>,
    profiles: Vec<AgentProfile>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            backend: None,
            retry: RetryPolicy::default(),
            memory_config: MemoryChainConfig::default(),
            completion_config: None,
            profiles: Vec::new(),
        }
    }

    pub fn backend(mut self, backend: Arc<dyn CompletionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn memory_config(mut self, config: MemoryChainConfig) -> Self {
        self.memory_config = config;
        self
    }

    pub fn completion_config(mut self, config: CompletionConfig) -> Self {
        self.completion_config = Some(config);
        self
    }

    pub fn agent_profiles(mut self, profiles: Vec<AgentProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn build(self) -> Session {
        let backend = self
            .backend
            .unwrap_or_else(|| Arc::new(MockBackend::new()));

        Session {
            tracker: Arc::new(ScenarioContextTracker::new()),
            chain: Arc::new(MemoryChain::new(
                Arc::new(PlaceholderSummarizer),
                self.memory_config,
            )),
            advisor: DelegationAdvisor::new(self.profiles),
            connection: Arc::new(ConnectionManager::new(backend, self.retry)),
            completion_config: self.completion_config,
            in_flight: AtomicBool::new(false),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
