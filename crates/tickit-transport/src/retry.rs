//! Bounded, jittered exponential backoff around a transport operation (§4.6, §7).

use std::time::Duration;

use tickit_core::ComponentId;
use tracing::warn;

use crate::error::{TransportError, TransportResult};

/// Retry policy for publish/subscribe calls against a possibly-flaky bus.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(1 << attempt.min(16));
        let capped = exp.min(self.max_delay);
        // Jitter: scale by a value in [0.5, 1.0) derived from the attempt
        // number, cheap and deterministic rather than pulling in `rand` for a
        // crate that has no other randomness need.
        let jitter_pct = 50 + (attempt * 37) % 50;
        capped.mul_f64(jitter_pct as f64 / 100.0)
    }
}

/// Run `op` up to `policy.max_attempts` times with exponential backoff between
/// attempts, logging each retry at `warn` and naming `component` for context.
/// Returns [`TransportError::BackoffExhausted`] wrapping the last error once
/// the budget runs out.
pub async fn with_backoff<F, Fut, T>(
    policy: RetryPolicy,
    component: &ComponentId,
    mut op: F,
) -> TransportResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = TransportResult<T>>,
{
    let mut last_err = None;
    for attempt in 0..policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!(
                    component = component.as_str(),
                    attempt,
                    error = %err,
                    "transport operation failed, retrying"
                );
                let delay = policy.delay_for(attempt);
                tokio::time::sleep(delay).await;
                last_err = Some(err);
            }
        }
    }
    Err(TransportError::BackoffExhausted {
        attempts: policy.max_attempts,
        source: Box::new(last_err.unwrap_or(TransportError::Disconnected)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry_when_op_succeeds_first_try() {
        let policy = RetryPolicy { max_attempts: 3, ..RetryPolicy::default() };
        let calls = AtomicU32::new(0);
        let result: TransportResult<u32> = with_backoff(policy, &ComponentId::new("c"), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_budget_and_wraps_last_error() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let result: TransportResult<()> = with_backoff(policy, &ComponentId::new("c"), || async {
            Err(TransportError::Disconnected)
        })
        .await;
        assert!(matches!(result, Err(TransportError::BackoffExhausted { attempts: 3, .. })));
    }
}
