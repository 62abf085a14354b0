use std::future::Future;
use std::time::Duration;

use super::types::ClarityError;
use tracing::warn;

/// Retry configuration for provider calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Unit of the linear backoff: attempt N waits `base_delay * N`.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the given failed attempt (1-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries. The last error is returned unchanged once the
/// attempts run out.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, ClarityError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClarityError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable {
                    warn!(
                        operation = operation_name,
                        error_type = classification.error_type,
                        "Non-retryable error, failing immediately"
                    );
                    return Err(e);
                }
                if attempt >= max_attempts {
                    warn!(
                        operation = operation_name,
                        attempt,
                        max = max_attempts,
                        error = %e,
                        "Max retries exhausted"
                    );
                    return Err(e);
                }

                let delay = config.delay_for(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_linear_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for(2), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let config = RetryConfig::default();
        let result = with_retry("test", &config, || async {
            Ok::<_, ClarityError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig::default();

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ClarityError::Config("no api key".into()))
            }
        }).await;

        assert!(matches!(result, Err(ClarityError::Config(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_third_attempt_succeeds() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig::default();
        let start = tokio::time::Instant::now();

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(ClarityError::Transport(format!("attempt {} failed", n)))
                } else {
                    Ok("done")
                }
            }
        }).await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_returns_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig::default();

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                Err::<(), _>(ClarityError::Provider { status: 500 + n as u16, message: "boom".into() })
            }
        }).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        match result {
            Err(ClarityError::Provider { status, .. }) => assert_eq!(status, 503),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
