//! Connection lifecycle around a completion backend

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use parley_core::{ChatMessage, ClientError, CompletionBackend, CompletionConfig};

use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

pub struct ConnectionManager {
    backend: Arc<dyn CompletionBackend>,
    retry: RetryPolicy,
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(backend: Arc<dyn CompletionBackend>, retry: RetryPolicy) -> Self {
        Self {
            backend,
            retry,
            state: RwLock::new(ConnectionState::Disconnected),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    pub async fn connect(&self) -> Result<(), ClientError> {
        let backend = self.backend.clone();
        let result = self
            .retry
            .run("connect", || {
                let backend = backend.clone();
                async move { backend.connect().await }
            })
            .await;

        match result {
            Ok(()) => {
                info!(backend = self.backend.backend_name(), "connected");
                *self.state.write() = ConnectionState::Connected;
                Ok(())
            }
            Err(error) => {
                *self.state.write() = ConnectionState::Disconnected;
                Err(error)
            }
        }
    }

    pub fn disconnect(&self) {
        debug!(backend = self.backend.backend_name(), "disconnected");
        *self.state.write() = ConnectionState::Disconnected;
    }

    /// Send the assembled message list. Retries transient failures; once the
    /// attempt budget is spent the connection reverts to disconnected and
    /// the aggregated error is surfaced.
    pub async fn send_message(
        &self,
        messages: &[ChatMessage],
        config: Option<&CompletionConfig>,
    ) -> Result<ChatMessage, ClientError> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }

        let backend = self.backend.clone();
        let result = self
            .retry
            .run("send_message", || {
                let backend = backend.clone();
                let messages = messages.to_vec();
                let config = config.cloned();
                async move { backend.complete(&messages, config.as_ref()).await }
            })
            .await;

        if let Err(ClientError::RetriesExhausted { .. }) = &result {
            *self.state.write() = ConnectionState::Disconnected;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    fn fast_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay_ms: 1,
            multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_connect_then_send() {
        let mock = MockBackend::new();
        let manager = ConnectionManager::new(Arc::new(mock), fast_retry());

        assert!(!manager.is_connected());
        manager.connect().await.unwrap();
        assert!(manager.is_connected());

        let reply = manager
            .send_message(&[ChatMessage::user("hello")], None)
            .await
            .unwrap();
        assert_eq!(reply.content, "mock reply");
    }

    #[tokio::test]
    async fn test_send_without_connect_rejected() {
        let manager = ConnectionManager::new(Arc::new(MockBackend::new()), fast_retry());
        let result = manager.send_message(&[ChatMessage::user("hi")], None).await;
        assert!(matches!(result.unwrap_err(), ClientError::NotConnected));
    }

    #[tokio::test]
    async fn test_send_retries_transient_failures() {
        let mock = MockBackend::new();
        mock.fail_times(2, "flaky");
        let manager = ConnectionManager::new(Arc::new(mock.clone()), fast_retry());

        manager.connect().await.unwrap();
        let reply = manager
            .send_message(&[ChatMessage::user("hello")], None)
            .await
            .unwrap();

        assert_eq!(reply.content, "mock reply");
        assert_eq!(mock.call_count(), 3);
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn test_exhaustion_reverts_to_disconnected() {
        let mock = MockBackend::new();
        mock.fail_times(10, "down");
        let manager = ConnectionManager::new(Arc::new(mock), fast_retry());

        manager.connect().await.unwrap();
        let result = manager
            .send_message(&[ChatMessage::user("hello")], None)
            .await;

        match result.unwrap_err() {
            ClientError::RetriesExhausted { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!manager.is_connected());
    }

    #[tokio::test]
    async fn test_malformed_response_is_fatal_but_keeps_connection() {
        let mock = MockBackend::new();
        mock.fail_fatal(1, "missing choices[0].message");
        let manager = ConnectionManager::new(Arc::new(mock.clone()), fast_retry());

        manager.connect().await.unwrap();
        let result = manager
            .send_message(&[ChatMessage::user("hello")], None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ClientError::MalformedResponse(_)
        ));
        // Fatal for the turn, not a connectivity failure: one attempt, still
        // connected.
        assert_eq!(mock.call_count(), 1);
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let manager = ConnectionManager::new(Arc::new(MockBackend::new()), fast_retry());
        manager.connect().await.unwrap();
        manager.disconnect();
        assert!(!manager.is_connected());
    }
}
