use std::time::Duration;

use anyhow::anyhow;
use recipedb_core::error::{classify, ErrorKind};
use recipedb_core::retry::RetryPolicy;

fn fast_policy() -> RetryPolicy {
    // Millisecond delays so the backoff path runs without slowing the suite.
    RetryPolicy::new(3, Duration::from_millis(1))
}

#[test]
fn rate_limit_errors_are_transient() {
    assert_eq!(classify(&anyhow!("HTTP 429 Too Many Requests")), ErrorKind::Transient);
    assert_eq!(classify(&anyhow!("resource exhausted")), ErrorKind::Transient);
    assert_eq!(classify(&anyhow!("backend unavailable (503)")), ErrorKind::Transient);
    assert_eq!(classify(&anyhow!("deadline exceeded")), ErrorKind::Transient);
}

#[test]
fn other_errors_are_permanent() {
    assert_eq!(classify(&anyhow!("401 unauthorized")), ErrorKind::Permanent);
    assert_eq!(classify(&anyhow!("malformed request body")), ErrorKind::Permanent);
}

#[test]
fn backoff_schedule_doubles_from_two_seconds() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.backoff_delay(0), Duration::from_secs(2));
    assert_eq!(policy.backoff_delay(1), Duration::from_secs(4));
    assert_eq!(policy.backoff_delay(2), Duration::from_secs(8));
}

#[test]
fn two_transient_failures_then_success() {
    let mut attempts = 0u32;
    let result: anyhow::Result<&str> = fast_policy().run(|| {
        attempts += 1;
        if attempts <= 2 {
            Err(anyhow!("rate limit exceeded, retry later"))
        } else {
            Ok("ok")
        }
    });
    assert_eq!(result.expect("third attempt succeeds"), "ok");
    assert_eq!(attempts, 3);
}

#[test]
fn permanent_failure_propagates_without_retry() {
    let mut attempts = 0u32;
    let result: anyhow::Result<()> = fast_policy().run(|| {
        attempts += 1;
        Err(anyhow!("invalid api key"))
    });
    assert!(result.is_err());
    assert_eq!(attempts, 1, "no retry on a permanent error");
}

#[test]
fn transient_failures_exhaust_and_surface_last_error() {
    let mut attempts = 0u32;
    let result: anyhow::Result<()> = fast_policy().run(|| {
        attempts += 1;
        Err(anyhow!("503 service unavailable (attempt {attempts})"))
    });
    let err = result.expect_err("all attempts fail");
    assert_eq!(attempts, 3);
    assert!(err.to_string().contains("attempt 3"), "last error propagates unchanged");
}
