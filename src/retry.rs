//! Exponential-backoff retry loop for transient provider failures

use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Runs `op` up to `max_attempts` times, sleeping between attempts.
///
/// The delay starts at `initial_delay` and doubles after each failed
/// attempt. Only errors marked retryable (transport failures, HTTP 429) are
/// retried; the first non-retryable error and the first success both end the
/// loop immediately. Exhausting all attempts returns the last error.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    initial_delay: Duration,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut delay = initial_delay;

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "Fetch attempt failed, backing off"
                );
                sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("retry loop returns on the final attempt")
}
