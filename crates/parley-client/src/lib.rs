//! Completion API client for Parley
//!
//! An OpenAI-style chat-completions backend, a fixed-attempt exponential
//! retry policy applied uniformly to connect and send, and the connection
//! manager that ties them to session state.

mod api;
mod manager;
mod mock;
mod retry;

pub use api::HttpBackend;
pub use manager::{ConnectionManager, ConnectionState};
pub use mock::MockBackend;
pub use retry::RetryPolicy;
