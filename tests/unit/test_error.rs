use reqwest::StatusCode;
use threec_client::error::AppError;

#[test]
fn test_app_error_display_unauthorized() {
    let error = AppError::Unauthorized;
    assert_eq!(error.to_string(), "unauthorized");
}

#[test]
fn test_app_error_display_rate_limit() {
    let error = AppError::RateLimitExceeded {
        message: "slow down".to_string(),
    };
    assert_eq!(error.to_string(), "rate limit exceeded: slow down");
}

#[test]
fn test_app_error_display_api_unavailable() {
    let with_status = AppError::ApiUnavailable {
        status: Some(StatusCode::BAD_GATEWAY),
        message: "upstream".to_string(),
    };
    assert_eq!(with_status.to_string(), "api unavailable (502): upstream");
    assert_eq!(
        AppError::malformed("bad json").to_string(),
        "api unavailable: bad json"
    );
}

#[test]
fn test_app_error_display_status_kinds() {
    let error = AppError::InvalidCredentials {
        status: StatusCode::UNAUTHORIZED,
        message: "wrong password".to_string(),
    };
    assert_eq!(error.to_string(), "invalid credentials (401): wrong password");

    let error = AppError::TokenExpired {
        status: StatusCode::FORBIDDEN,
        message: "expired".to_string(),
    };
    assert_eq!(error.to_string(), "token expired (403): expired");

    let error = AppError::ClientError {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        message: "bad phone".to_string(),
    };
    assert_eq!(error.to_string(), "client error (422): bad phone");
}

#[test]
fn test_app_error_display_mailing_kinds() {
    assert_eq!(
        AppError::InvalidInput("no contacts".to_string()).to_string(),
        "invalid input: no contacts"
    );
    assert_eq!(
        AppError::CreateMailingFailed("dup".to_string()).to_string(),
        "create mailing failed: dup"
    );
    assert_eq!(
        AppError::UploadFailed("closed".to_string()).to_string(),
        "upload failed: closed"
    );
    assert_eq!(
        AppError::WeightUpdateFailed("range".to_string()).to_string(),
        "weight update failed: range"
    );
}

#[test]
fn test_app_error_status() {
    assert_eq!(AppError::Unauthorized.status(), None);
    assert_eq!(
        AppError::RateLimitExceeded {
            message: String::new()
        }
        .status(),
        Some(StatusCode::TOO_MANY_REQUESTS)
    );
    assert_eq!(AppError::malformed("x").status(), None);
}

#[test]
fn test_app_error_is_transient() {
    assert!(AppError::malformed("x").is_transient());
    assert!(
        AppError::RateLimitExceeded {
            message: String::new()
        }
        .is_transient()
    );
    assert!(!AppError::Unauthorized.is_transient());
    assert!(
        !AppError::ClientError {
            status: StatusCode::BAD_REQUEST,
            message: String::new()
        }
        .is_transient()
    );
}

#[test]
fn test_app_error_is_not_found() {
    let error = AppError::ClientError {
        status: StatusCode::NOT_FOUND,
        message: "Not Found".to_string(),
    };
    assert!(error.is_not_found());
    assert!(!AppError::Unauthorized.is_not_found());
}

#[test]
fn test_app_error_from_serde() {
    let json = r#"{"invalid": json}"#;
    let serde_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
    let app_error: AppError = serde_error.into();
    assert!(matches!(app_error, AppError::ApiUnavailable { status: None, .. }));
}
