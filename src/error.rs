/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types for the 3C Plus client
//!
//! Every failed call into the platform is reported as one [`AppError`] kind.
//! HTTP-originated failures are always classified; transport failures and
//! 5xx answers share the [`AppError::ApiUnavailable`] kind.

use reqwest::StatusCode;
use std::fmt;

/// Classified error returned by every fallible operation of the crate
#[derive(Debug)]
pub enum AppError {
    /// Login rejected by the server. Do not retry with the same credentials.
    InvalidCredentials {
        /// Status returned by the login endpoint
        status: StatusCode,
        /// Message extracted from the response
        message: String,
    },
    /// An authenticated call was rejected because the token is stale or invalid.
    /// The session has been cleared locally; the caller must log in again.
    TokenExpired {
        /// Status returned by the server (401 or 403)
        status: StatusCode,
        /// Message extracted from the response
        message: String,
    },
    /// An operation requiring a token was invoked while unauthenticated.
    /// No network call was made.
    Unauthorized,
    /// HTTP 429. The caller should back off before retrying.
    RateLimitExceeded {
        /// Message extracted from the response
        message: String,
    },
    /// 5xx answer, transport failure, timeout or a malformed success body
    ApiUnavailable {
        /// Status returned by the server, `None` for transport failures
        status: Option<StatusCode>,
        /// Human readable description
        message: String,
    },
    /// Any other 4xx answer
    ClientError {
        /// Raw status returned by the server
        status: StatusCode,
        /// Message extracted from the response
        message: String,
    },
    /// Local validation failure, raised before any network call
    InvalidInput(String),
    /// The mailing container could not be created
    CreateMailingFailed(String),
    /// Contacts could not be uploaded
    UploadFailed(String),
    /// The server refused the mailing weight update
    WeightUpdateFailed(String),
}

impl AppError {
    /// Builds an `ApiUnavailable` error for a malformed server payload
    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::ApiUnavailable {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status attached to this error, when it originated from a response
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::InvalidCredentials { status, .. }
            | AppError::TokenExpired { status, .. }
            | AppError::ClientError { status, .. } => Some(*status),
            AppError::RateLimitExceeded { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            AppError::ApiUnavailable { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the failure is a transient condition worth retrying later
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::ApiUnavailable { .. } | AppError::RateLimitExceeded { .. }
        )
    }

    /// Whether the server answered 404 for the requested resource
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ClientError { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidCredentials { status, message } => {
                write!(f, "invalid credentials ({}): {}", status.as_u16(), message)
            }
            AppError::TokenExpired { status, message } => {
                write!(f, "token expired ({}): {}", status.as_u16(), message)
            }
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::RateLimitExceeded { message } => {
                write!(f, "rate limit exceeded: {message}")
            }
            AppError::ApiUnavailable {
                status: Some(status),
                message,
            } => write!(f, "api unavailable ({}): {}", status.as_u16(), message),
            AppError::ApiUnavailable {
                status: None,
                message,
            } => write!(f, "api unavailable: {message}"),
            AppError::ClientError { status, message } => {
                write!(f, "client error ({}): {}", status.as_u16(), message)
            }
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::CreateMailingFailed(msg) => write!(f, "create mailing failed: {msg}"),
            AppError::UploadFailed(msg) => write!(f, "upload failed: {msg}"),
            AppError::WeightUpdateFailed(msg) => write!(f, "weight update failed: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status();
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else if err.is_decode() {
            "malformed response body".to_string()
        } else {
            // strip the url so query strings never reach the message
            err.without_url().to_string()
        };
        AppError::ApiUnavailable { status, message }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::malformed(format!("malformed response body: {err}"))
    }
}
