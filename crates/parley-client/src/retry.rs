//! Fixed-attempt exponential backoff

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use parley_core::ClientError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_multiplier() -> f64 {
    2.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetryPolicy {
    /// Run the operation until it succeeds, fails with a non-retryable
    /// error, or the attempt budget is spent. Exhaustion surfaces a single
    /// aggregated error embedding the last underlying cause.
    pub async fn run<T, F, Fut>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(error);
                    }

                    if attempts >= self.max_attempts {
                        return Err(ClientError::RetriesExhausted {
                            attempts,
                            last_error: error.to_string(),
                        });
                    }

                    let wait = self.delay(attempts);
                    warn!(
                        operation = operation_name,
                        attempt = attempts,
                        max_attempts = self.max_attempts,
                        wait_ms = wait.as_millis() as u64,
                        error = %error,
                        "retrying after failure"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let wait_ms = self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32 - 1);
        Duration::from_millis(wait_ms as u64)
    }
}
