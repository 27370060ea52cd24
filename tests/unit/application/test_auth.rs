use super::common::{create_test_config, logged_in_client, mock_login};
use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::json;
use threec_client::application::auth::AuthClient;
use threec_client::application::config::Credentials;
use threec_client::error::AppError;
use threec_client::model::retry::RetryPolicy;
use std::io::Write;
use std::time::Duration;

#[tokio::test]
async fn test_full_session_lifecycle() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/authenticate")
        .match_body(Matcher::Json(json!({
            "user": "ana@example.com",
            "password": "secret",
            "company_id": 7,
            "company_domain": "acme"
        })))
        .with_status(200)
        .with_body(r#"{"data":{"api_token":"abc123"}}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(r#"{"name":"João","email":"joao@example.com"}"#)
        .create_async()
        .await;
    let logout = server
        .mock("GET", "/logout")
        .match_header("authorization", "Bearer abc123")
        .with_status(200)
        .with_body(r#"{"message":"ok"}"#)
        .expect(1)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    assert!(!auth.is_authenticated().await);
    assert!(auth.authenticated_at().await.is_none());

    auth.login().await.unwrap();
    assert!(auth.is_authenticated().await);
    assert!(auth.authenticated_at().await.is_some());

    let session = auth.verificar_sessao().await.unwrap();
    assert_eq!(session["name"], "João");

    auth.logout().await.unwrap();
    assert!(!auth.is_authenticated().await);

    // second logout never reaches the server
    assert!(matches!(auth.logout().await, Err(AppError::Unauthorized)));

    login.assert_async().await;
    me.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn test_login_rejected_is_invalid_credentials() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/authenticate")
        .with_status(401)
        .with_body(r#"{"message":"invalid credentials"}"#)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    match auth.login().await {
        Err(AppError::InvalidCredentials { status, message }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_login_without_token_in_body_is_api_unavailable() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/authenticate")
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    assert!(matches!(
        auth.login().await,
        Err(AppError::ApiUnavailable { status: None, .. })
    ));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_incomplete_credentials_make_no_call() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/authenticate")
        .expect(0)
        .create_async()
        .await;

    let mut config = create_test_config(&server.url());
    config.credentials.password = String::new();
    let auth = AuthClient::new(config).unwrap();

    assert!(matches!(auth.login().await, Err(AppError::InvalidInput(_))));
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_with_other_company_is_rejected() {
    let server = Server::new_async().await;
    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    let other = Credentials::new("ana@example.com", "secret", 8, "other");
    assert!(matches!(
        auth.login_with(&other).await,
        Err(AppError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_login_with_explicit_credentials() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/authenticate")
        .match_body(Matcher::PartialJson(json!({"user": "bruno@example.com"})))
        .with_status(200)
        .with_body(r#"{"token":"xyz"}"#)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    let credentials = Credentials::new("bruno@example.com", "other-secret", 7, "acme");
    auth.login_with(&credentials).await.unwrap();
    assert!(auth.is_authenticated().await);
    login.assert_async().await;
}

#[tokio::test]
async fn test_verify_without_login_is_unauthorized_and_offline() {
    let mut server = Server::new_async().await;
    let me = server.mock("GET", "/me").expect(0).create_async().await;

    let auth = AuthClient::new(create_test_config(&server.url())).unwrap();
    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::Unauthorized)
    ));
    me.assert_async().await;
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let me = server
        .mock("GET", "/me")
        .with_status(401)
        .with_body(r#"{"message":"token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::TokenExpired { .. })
    ));
    assert!(!auth.is_authenticated().await);

    // the dead token is not reused
    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::Unauthorized)
    ));
    me.assert_async().await;
}

#[tokio::test]
async fn test_forbidden_with_token_clears_session() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let _me = server.mock("GET", "/me").with_status(403).create_async().await;

    match auth.verificar_sessao().await {
        Err(AppError::TokenExpired { status, message }) => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected TokenExpired, got {other:?}"),
    }
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_server_errors_keep_session() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let _unavailable = server
        .mock("GET", "/me")
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    match auth.verificar_sessao().await {
        Err(AppError::ApiUnavailable { status, message }) => {
            assert_eq!(status, Some(StatusCode::SERVICE_UNAVAILABLE));
            assert_eq!(message, "upstream down");
        }
        other => panic!("expected ApiUnavailable, got {other:?}"),
    }
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_rate_limit_keeps_session() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let _limited = server
        .mock("GET", "/me")
        .with_status(429)
        .with_body(r#"{"error":"slow down"}"#)
        .create_async()
        .await;

    match auth.verificar_sessao().await {
        Err(AppError::RateLimitExceeded { message }) => assert_eq!(message, "slow down"),
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_connection_failure_is_api_unavailable() {
    let auth = AuthClient::new(create_test_config("http://127.0.0.1:1")).unwrap();
    assert!(matches!(
        auth.login().await,
        Err(AppError::ApiUnavailable { status: None, .. })
    ));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_failed_logout_still_clears_session() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let _logout = server
        .mock("GET", "/logout")
        .with_status(500)
        .create_async()
        .await;

    assert!(matches!(
        auth.logout().await,
        Err(AppError::ApiUnavailable { .. })
    ));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_relogin_replaces_token() {
    let mut server = Server::new_async().await;
    let auth = logged_in_client(&mut server).await;
    let _second = server
        .mock("POST", "/authenticate")
        .with_status(200)
        .with_body(r#"{"api_token":"fresh"}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    auth.login().await.unwrap();
    auth.verificar_sessao().await.unwrap();
    me.assert_async().await;
}

#[tokio::test]
async fn test_opt_in_retry_repeats_transient_failures() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let me = server
        .mock("GET", "/me")
        .with_status(502)
        .expect(2)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url()))
        .unwrap()
        .with_retry(
            RetryPolicy::new(2)
                .with_base_delay(Duration::from_millis(1))
                .with_max_jitter(Duration::ZERO),
        );
    auth.login().await.unwrap();

    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::ApiUnavailable { .. })
    ));
    me.assert_async().await;
    assert!(auth.is_authenticated().await);
}

#[tokio::test]
async fn test_accessors() {
    let server = Server::new_async().await;
    let auth = AuthClient::new(create_test_config(&format!("{}/", server.url()))).unwrap();
    assert_eq!(auth.base_url(), server.url());
    assert_eq!(auth.company_id(), 7);
    assert_eq!(auth.company_domain(), "acme");
    assert!(auth.config().retry.is_none());
    assert!(!format!("{auth:?}").contains("secret"));
}

#[tokio::test]
async fn test_retry_never_repeats_client_errors() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let me = server
        .mock("GET", "/me")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let auth = AuthClient::new(create_test_config(&server.url()))
        .unwrap()
        .with_retry(RetryPolicy::new(3).with_base_delay(Duration::from_millis(1)));
    auth.login().await.unwrap();

    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::TokenExpired { .. })
    ));
    me.assert_async().await;
}

#[tokio::test]
async fn test_login_timeout_is_api_unavailable() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/authenticate")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(2500));
            w.write_all(br#"{"api_token":"late"}"#)
        })
        .create_async()
        .await;

    let config = create_test_config(&server.url()).with_timeouts(1, 1);
    let auth = AuthClient::new(config).unwrap();
    assert!(matches!(
        auth.login().await,
        Err(AppError::ApiUnavailable { status: None, .. })
    ));
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_timeout_on_authenticated_call_keeps_session() {
    let mut server = Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _me = server
        .mock("GET", "/me")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(2500));
            w.write_all(b"{}")
        })
        .create_async()
        .await;

    let config = create_test_config(&server.url()).with_timeouts(1, 1);
    let auth = AuthClient::new(config).unwrap();
    auth.login().await.unwrap();

    assert!(matches!(
        auth.verificar_sessao().await,
        Err(AppError::ApiUnavailable { status: None, .. })
    ));
    assert!(auth.is_authenticated().await);
}
