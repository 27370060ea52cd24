/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! In-memory session state owned by one [`AuthClient`](crate::application::auth::AuthClient)

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::fmt;

/// Opaque bearer token returned by the login endpoint
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token, only meant for building the `Authorization` header
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header for this token
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Authenticated identity held by one client instance
///
/// The session is authenticated exactly when a token is present. Company and
/// base url are fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionState {
    token: Option<Token>,
    authenticated_at: Option<DateTime<Utc>>,
    company_id: u64,
    company_domain: String,
    base_url: String,
}

impl SessionState {
    /// Creates an empty, unauthenticated session
    pub fn new(company_id: u64, company_domain: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: None,
            authenticated_at: None,
            company_id,
            company_domain: company_domain.into(),
            base_url: base_url.into(),
        }
    }

    /// Records a new token and marks the session authenticated.
    /// A previous token is dropped without a revocation call.
    pub fn set(&mut self, token: Token) {
        self.token = Some(token);
        self.authenticated_at = Some(Utc::now());
    }

    /// Removes the token. Clearing an empty session is a no-op.
    pub fn clear(&mut self) {
        self.token = None;
        self.authenticated_at = None;
    }

    /// Returns the current token or `AppError::Unauthorized`
    pub fn require_authenticated(&self) -> Result<Token, AppError> {
        self.token.clone().ok_or(AppError::Unauthorized)
    }

    /// Whether a token is currently held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// When the current token was obtained
    #[must_use]
    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.authenticated_at
    }

    /// Company id the session belongs to
    #[must_use]
    pub fn company_id(&self) -> u64 {
        self.company_id
    }

    /// Company domain the session belongs to
    #[must_use]
    pub fn company_domain(&self) -> &str {
        &self.company_domain
    }

    /// API root the session talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
