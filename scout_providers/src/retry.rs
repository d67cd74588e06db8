use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation with a fixed backoff schedule followed by a
/// number of flat 10-second retries.
///
/// Returns the first success, or the last error once every attempt is
/// spent.
pub async fn retry_with_backoff<F, Fut, T, E>(
    mut operation: F,
    base_delays: &[u64],
    final_retries: usize,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = base_delays.len() + final_retries;
    let mut last_error = None;

    for attempt in 1..=total {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt < total {
                    let delay = base_delays.get(attempt - 1).copied().unwrap_or(10);
                    warn!(
                        "Request failed (attempt {attempt}/{total}): {e}. Retrying after {delay}s..."
                    );
                    sleep(Duration::from_secs(delay)).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| panic!("All retry attempts exhausted but no error was stored")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn first_success_short_circuits() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), String>(())
                }
            },
            &[1, 2],
            2,
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        tokio::time::pause();

        let attempts = Arc::new(AtomicUsize::new(0));
        let task = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(String::from("transient"))
                    } else {
                        Ok(())
                    }
                }
            },
            &[1, 2],
            2,
        );

        let result: Result<(), String> = task.await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        tokio::time::pause();

        let attempts = Arc::new(AtomicUsize::new(0));
        let result: Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("down"))
                }
            },
            &[1, 2],
            2,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }
}
