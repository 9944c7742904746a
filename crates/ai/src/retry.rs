//! Generic retry-with-backoff for calls to the AI service.
//!
//! One utility shared by every operation that talks to the upstream, so
//! the backoff policy lives in exactly one place.

use std::future::Future;
use std::time::Duration;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(2000),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Run `op` up to `policy.max_attempts` times.
///
/// A failed attempt is retried only when `is_retryable` returns `true`
/// for its error; anything else propagates immediately. Between attempts
/// the current delay is slept, then doubled (clamped to
/// [`RetryPolicy::max_delay`]). Once attempts are exhausted the last
/// error propagates; there is never a partial success.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    is_retryable: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_attempts && is_retryable(&err) => {
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "AI call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(policy.max_delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("status {status}")]
    struct FakeError {
        status: u16,
    }

    fn retryable(err: &FakeError) -> bool {
        matches!(err.status, 429 | 503)
    }

    /// Operation that fails with the given statuses before succeeding.
    fn failing_op(
        calls: Arc<AtomicU32>,
        failures: &'static [u16],
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<u32, FakeError>> + Send>>
    {
        move || {
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                match failures.get(n as usize) {
                    Some(&status) => Err(FakeError { status }),
                    None => Ok(n + 1),
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_with_doubling_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = tokio::time::Instant::now();

        let result = with_retry(
            &RetryPolicy::default(),
            retryable,
            failing_op(Arc::clone(&calls), &[503, 503]),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 2000 ms after the first failure, 4000 ms after the second.
        assert_eq!(started.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_failure_propagates_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = tokio::time::Instant::now();

        let result = with_retry(
            &RetryPolicy::default(),
            retryable,
            failing_op(Arc::clone(&calls), &[400]),
        )
        .await;

        assert_eq!(result.unwrap_err().status, 400);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_return_the_last_error() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry(
            &RetryPolicy::default(),
            retryable,
            failing_op(Arc::clone(&calls), &[503, 429, 503, 503]),
        )
        .await;

        assert_eq!(result.unwrap_err().status, 503);
        // max_attempts = 3: no fourth call.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_clamps_at_max_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_secs(20),
            max_delay: Duration::from_secs(30),
        };
        let started = tokio::time::Instant::now();

        let result = with_retry(&policy, retryable, failing_op(Arc::clone(&calls), &[503, 503]))
            .await;

        assert!(result.is_ok());
        // 20 s, then 40 s clamped to 30 s.
        assert_eq!(started.elapsed(), Duration::from_secs(50));
    }
}
