use threec_client::utils::config::{get_env_or_default, get_env_or_none};

// Each test uses its own variable names so they can run in parallel

#[test]
fn test_get_env_or_default() {
    unsafe {
        std::env::set_var("THREEC_TEST_DEFAULT_NUM", "42");
        std::env::set_var("THREEC_TEST_DEFAULT_BAD", "not a number");
        std::env::set_var("THREEC_TEST_DEFAULT_BLANK", "   ");
    }
    assert_eq!(get_env_or_default("THREEC_TEST_DEFAULT_NUM", 0u64), 42);
    assert_eq!(get_env_or_default("THREEC_TEST_DEFAULT_BAD", 7u64), 7);
    assert_eq!(
        get_env_or_default("THREEC_TEST_DEFAULT_BLANK", "fallback".to_string()),
        "fallback"
    );
    assert_eq!(get_env_or_default("THREEC_TEST_DEFAULT_UNSET", 3u32), 3);
}

#[test]
fn test_get_env_or_none() {
    unsafe {
        std::env::set_var("THREEC_TEST_NONE_SET", " acme ");
    }
    assert_eq!(
        get_env_or_none::<String>("THREEC_TEST_NONE_SET").as_deref(),
        Some("acme")
    );
    assert_eq!(get_env_or_none::<u64>("THREEC_TEST_NONE_UNSET"), None);
}
