/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Request executor
//!
//! [`HttpExecutor::execute`] issues exactly one HTTP call and turns its outcome
//! into either the decoded JSON payload or a classified [`AppError`]. It never
//! retries and never touches session state; both are decided by the caller.

use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::endpoint::{Endpoint, Operation};
use crate::model::session::Token;
use crate::utils::id::idempotency_key;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest server message kept in an error, in characters
const MAX_ERROR_MESSAGE_CHARS: usize = 300;

/// File attached to a multipart request
#[derive(Clone)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name sent to the server
    pub file_name: String,
    /// MIME type of the content
    pub mime: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Body of an outbound call
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON document
    Json(Value),
    /// `multipart/form-data` with text fields and an optional file
    Multipart {
        /// Text fields
        fields: Vec<(String, String)>,
        /// Attached file
        file: Option<FilePart>,
    },
}

impl RequestBody {
    /// Serializes `value` into a JSON body
    ///
    /// # Errors
    /// `AppError::InvalidInput` when `value` cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, AppError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| AppError::InvalidInput(format!("unserializable request body: {e}")))
    }

    fn to_form(&self) -> Result<Option<Form>, AppError> {
        let RequestBody::Multipart { fields, file } = self else {
            return Ok(None);
        };
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        if let Some(file) = file {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)
                .map_err(|_| AppError::InvalidInput(format!("invalid mime type: {}", file.mime)))?;
            form = form.part(file.field.clone(), part);
        }
        Ok(Some(form))
    }
}

/// Everything the executor needs for one call
#[derive(Debug, Clone)]
pub struct ApiCall<'a> {
    /// Logical operation, used to disambiguate overlapping status codes
    pub operation: Operation,
    /// Resolved method and path
    pub endpoint: &'a Endpoint,
    /// Optional body
    pub body: Option<&'a RequestBody>,
    /// Bearer token, `None` for unauthenticated calls
    pub token: Option<&'a Token>,
    /// Per-call timeout, `None` uses the executor default
    pub timeout: Option<Duration>,
    /// `Idempotency-Key` header value, shared by every attempt of this call
    pub idempotency_key: Option<String>,
}

impl<'a> ApiCall<'a> {
    /// Unauthenticated call without body
    pub fn new(operation: Operation, endpoint: &'a Endpoint) -> Self {
        Self {
            operation,
            endpoint,
            body: None,
            token: None,
            timeout: None,
            idempotency_key: None,
        }
    }

    /// Attaches a body
    #[must_use]
    pub fn with_body(mut self, body: &'a RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches a bearer token
    #[must_use]
    pub fn with_token(mut self, token: &'a Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Overrides the timeout for this call
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Marks the call as idempotent with a fresh key, reused on retries
    #[must_use]
    pub fn idempotent(mut self) -> Self {
        self.idempotency_key = Some(idempotency_key());
        self
    }
}

/// Issues single HTTP calls against one API root
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    default_timeout: Duration,
}

impl HttpExecutor {
    /// Creates an executor for `base_url`
    ///
    /// # Errors
    /// `AppError::ApiUnavailable` if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, default_timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            default_timeout,
        })
    }

    /// API root this executor talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes `call` once and classifies the outcome
    ///
    /// # Returns
    /// * `Ok(Value)` - Decoded JSON body of a 2xx answer (`Null` for an empty body)
    /// * `Err(AppError)` - Classified failure
    pub async fn execute(&self, call: &ApiCall<'_>) -> Result<Value, AppError> {
        let url = call.endpoint.url(&self.base_url);
        let method: reqwest::Method = call.endpoint.method.into();
        debug!("{} {} ({})", method, url, call.operation);

        let mut request = self
            .client
            .request(method, &url)
            .timeout(call.timeout.unwrap_or(self.default_timeout))
            .header(header::ACCEPT, "application/json");

        if let Some(token) = call.token {
            request = request.header(header::AUTHORIZATION, token.bearer());
        }
        if let Some(key) = &call.idempotency_key {
            request = request.header("Idempotency-Key", key.as_str());
        }
        if let Some(body) = call.body {
            match body {
                RequestBody::Json(value) => request = request.json(value),
                RequestBody::Multipart { .. } => {
                    if let Some(form) = body.to_form()? {
                        request = request.multipart(form);
                    }
                }
            }
        }

        let response = request.send().await.map_err(|e| {
            warn!("{} transport failure", call.operation);
            AppError::from(e)
        })?;
        let status = response.status();
        debug!("Response status: {}", status);

        let text = response.text().await?;

        if status.is_success() {
            return decode_success(&text);
        }

        let err = classify_failure(call.operation, status, call.token.is_some(), &text);
        warn!("{} failed with status {}", call.operation, status.as_u16());
        Err(err)
    }
}

/// Decodes a 2xx body. An empty body is `Null`; anything else must be JSON.
pub fn decode_success(text: &str) -> Result<Value, AppError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|_| AppError::malformed("success response is not valid JSON"))
}

/// Classifies a non-2xx answer
///
/// The same status means different things depending on the call: 401 on the
/// login call is a credential rejection, while 401/403 on a call that carried
/// a token means the token is no longer accepted.
#[must_use]
pub fn classify_failure(
    operation: Operation,
    status: StatusCode,
    token_supplied: bool,
    body: &str,
) -> AppError {
    let message = error_message(status, body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return AppError::RateLimitExceeded { message };
    }
    if status.is_server_error() {
        return AppError::ApiUnavailable {
            status: Some(status),
            message,
        };
    }
    if operation.is_login()
        && (status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED)
    {
        return AppError::InvalidCredentials { status, message };
    }
    if token_supplied && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
        return AppError::TokenExpired { status, message };
    }
    if status.is_client_error() {
        return AppError::ClientError { status, message };
    }
    // 1xx/3xx reaching here break the API contract
    AppError::ApiUnavailable {
        status: Some(status),
        message,
    }
}

/// Human readable message of an error answer
///
/// Uses the body's `message` field, else `error`, else the raw text, else the
/// canonical reason of the status.
#[must_use]
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = map.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()) {
                return truncate(text);
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate(trimmed);
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_MESSAGE_CHARS).collect()
}
