//! Exponential backoff for transient document fetch failures.
//!
//! Only conditions that can clear up on their own are retried. A missing
//! document or a body that does not parse fails the source immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Upper bound on any single wait between attempts.
const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` is worth another attempt after a delay.
///
/// Retriable:
/// - [`CatalogError::RateLimited`]: HTTP 429.
/// - [`CatalogError::UnexpectedStatus`] with a 5xx status.
/// - [`CatalogError::Http`]: timeouts and connection failures.
fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::RateLimited { .. } => true,
        CatalogError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        CatalogError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        CatalogError::Io { .. }
        | CatalogError::Deserialize { .. }
        | CatalogError::UnexpectedShape { .. }
        | CatalogError::NotFound { .. }
        | CatalogError::InvalidBase { .. }
        | CatalogError::InvalidRecord { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based). `jitter` is a factor in
/// `0.0..1.0` spreading the exponential step over ±25 %. A rate-limit
/// `Retry-After` is a floor on the result; everything is capped at
/// [`MAX_DELAY_MS`].
fn backoff_delay_ms(attempt: u32, backoff_base_secs: u64, err: &CatalogError, jitter: f64) -> u64 {
    let computed = backoff_base_secs
        .saturating_mul(1000)
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (computed.min(MAX_DELAY_MS) as f64 * (jitter * 0.5 + 0.75)) as u64;
    let floor = match err {
        CatalogError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    jittered.max(floor).min(MAX_DELAY_MS)
}

/// Runs `operation`, retrying retriable failures up to `max_retries` more
/// times. The n-th retry waits `backoff_base_secs * 2^(n-1)` seconds ±25 %
/// jitter, or the server's `Retry-After` if longer, capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms =
                    backoff_delay_ms(attempt, backoff_base_secs, &err, rand::random::<f64>());
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient catalog fetch error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const URL: &str = "https://arise.example/man/products.json";

    /// Runs `retry_with_backoff` with zero delay over a script of outcomes,
    /// one per attempt (the last outcome repeats). Returns the result and
    /// the number of attempts made.
    async fn run_script(
        max_retries: u32,
        script: &[fn() -> Result<u32, CatalogError>],
    ) -> (Result<u32, CatalogError>, u32) {
        let attempts = AtomicU32::new(0);
        let result = retry_with_backoff(max_retries, 0, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) as usize;
            let outcome = script[n.min(script.len() - 1)]();
            async move { outcome }
        })
        .await;
        (result, attempts.load(Ordering::SeqCst))
    }

    fn ok() -> Result<u32, CatalogError> {
        Ok(7)
    }

    fn unavailable() -> Result<u32, CatalogError> {
        Err(CatalogError::UnexpectedStatus {
            status: 503,
            url: URL.to_owned(),
        })
    }

    fn rate_limited() -> Result<u32, CatalogError> {
        Err(CatalogError::RateLimited {
            url: URL.to_owned(),
            retry_after_secs: 0,
        })
    }

    fn forbidden() -> Result<u32, CatalogError> {
        Err(CatalogError::UnexpectedStatus {
            status: 403,
            url: URL.to_owned(),
        })
    }

    fn missing() -> Result<u32, CatalogError> {
        Err(CatalogError::NotFound {
            url: URL.to_owned(),
        })
    }

    #[tokio::test]
    async fn first_success_makes_one_attempt() {
        let (result, attempts) = run_script(3, &[ok]).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_success() {
        let (result, attempts) = run_script(3, &[unavailable, unavailable, ok]).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries_with_last_error() {
        let (result, attempts) = run_script(2, &[rate_limited]).await;
        assert_eq!(attempts, 3, "one attempt plus two retries");
        assert!(matches!(result, Err(CatalogError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let (result, attempts) = run_script(0, &[unavailable, ok]).await;
        assert_eq!(attempts, 1);
        assert!(result.is_err());
    }

    #[test]
    fn delay_doubles_per_attempt_within_jitter() {
        let err = unavailable().unwrap_err();
        assert_eq!(backoff_delay_ms(1, 1, &err, 0.5), 1_000);
        assert_eq!(backoff_delay_ms(3, 1, &err, 0.5), 4_000);
        assert_eq!(backoff_delay_ms(3, 1, &err, 0.0), 3_000);
        assert_eq!(backoff_delay_ms(9, 1, &err, 0.5), MAX_DELAY_MS);
    }

    #[test]
    fn retry_after_sets_a_floor_on_the_delay() {
        let limited = |retry_after_secs| CatalogError::RateLimited {
            url: URL.to_owned(),
            retry_after_secs,
        };
        assert_eq!(backoff_delay_ms(1, 1, &limited(5), 0.5), 5_000);
        assert_eq!(backoff_delay_ms(1, 4, &limited(2), 0.5), 4_000);
        assert_eq!(backoff_delay_ms(1, 1, &limited(60), 0.5), MAX_DELAY_MS);
        assert_eq!(backoff_delay_ms(1, 0, &limited(0), 0.5), 0);
    }

    #[tokio::test]
    async fn permanent_failures_are_not_retried() {
        let permanent: [fn() -> Result<u32, CatalogError>; 2] = [missing, forbidden];
        for script in permanent {
            let (result, attempts) = run_script(3, &[script, ok]).await;
            assert_eq!(attempts, 1);
            assert!(result.is_err());
        }
    }
}
