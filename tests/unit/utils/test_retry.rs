use std::time::Duration;
use threec_client::constants::{ENV_MAX_RETRIES, ENV_RETRY_BASE_DELAY_MS};
use threec_client::error::AppError;
use threec_client::model::retry::RetryPolicy;

#[test]
fn test_retry_policy_default() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.base_delay, Duration::from_millis(1000));
    assert_eq!(policy.max_jitter, Duration::from_millis(100));
}

// The only test touching the retry variables, so it cannot race another one
#[test]
fn test_retry_policy_from_env() {
    unsafe {
        std::env::remove_var(ENV_MAX_RETRIES);
        std::env::remove_var(ENV_RETRY_BASE_DELAY_MS);
    }
    assert!(RetryPolicy::from_env().is_none());

    unsafe {
        std::env::set_var(ENV_MAX_RETRIES, "4");
    }
    let policy = RetryPolicy::from_env().unwrap();
    assert_eq!(policy.max_attempts, 4);
    assert_eq!(policy.base_delay, Duration::from_millis(1000));

    unsafe {
        std::env::set_var(ENV_RETRY_BASE_DELAY_MS, "250");
    }
    let policy = RetryPolicy::from_env().unwrap();
    assert_eq!(policy.base_delay, Duration::from_millis(250));

    unsafe {
        std::env::remove_var(ENV_MAX_RETRIES);
        std::env::remove_var(ENV_RETRY_BASE_DELAY_MS);
    }
}

#[test]
fn test_run_returns_first_success_without_delay() {
    let policy = RetryPolicy::new(3);
    let result = tokio_test::block_on(policy.run(|| async { Ok::<_, AppError>(7) }));
    assert_eq!(result.unwrap(), 7);
}
