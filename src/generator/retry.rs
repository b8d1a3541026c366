use std::future::Future;
use std::time::{Duration, Instant};

use tracing::info;

use crate::errors::VexError;
use crate::llm::is_rate_limit;

/// Runs `f` until it returns something other than a rate-limit-shaped error,
/// sleeping a fixed `interval` between attempts, up to `max_retry` attempts.
///
/// The sleep is a plain `tokio::time::sleep`, so cancelling the surrounding
/// task aborts it mid-interval.
pub async fn retry_on_rate_limit<F, Fut, T>(
    interval: Duration,
    max_retry: u32,
    mut f: F,
) -> Result<T, VexError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VexError>>,
{
    let began = Instant::now();
    let mut last_err = None;
    for _ in 0..max_retry {
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) if is_rate_limit(&e) => {
                info!(interval_secs = interval.as_secs_f64(), error = %e, "Detected rate limit. Sleeping.");
                tokio::time::sleep(interval).await;
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    let elapsed = began.elapsed();
    let last = last_err.map(|e| e.to_string()).unwrap_or_default();
    Err(VexError::RateLimit(format!(
        "still hitting rate limit, after retrying {} times in {:?}: {}",
        max_retry, elapsed, last
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let result =
            retry_on_rate_limit(Duration::from_millis(1), 10, || async { Ok::<_, VexError>(42) })
                .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_non_rate_limit_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = retry_on_rate_limit(Duration::from_millis(1), 10, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(VexError::Network("connection refused".into()))
            }
        })
        .await;

        assert!(matches!(result.unwrap_err(), VexError::Network(_)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = retry_on_rate_limit(Duration::from_millis(1), 10, || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(VexError::RateLimit("slow down".into()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_exhausted_retries_report_attempts_and_elapsed() {
        let result = retry_on_rate_limit(Duration::from_millis(1), 2, || async {
            Err::<(), _>(VexError::RateLimit("slow down".into()))
        })
        .await;

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("retrying 2 times"), "got: {}", msg);
        assert!(msg.contains("slow down"), "got: {}", msg);
    }
}
