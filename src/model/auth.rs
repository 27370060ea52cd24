/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::application::config::Credentials;
use crate::model::session::Token;
use serde::Serialize;
use serde_json::Value;

/// Body of the login call
///
/// Only ever serialized into the request; it has no `Debug` so the password
/// cannot end up in a log line.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    /// Login email
    pub user: &'a str,
    /// Login password
    pub password: &'a str,
    /// Numeric company id
    pub company_id: u64,
    /// Company domain
    pub company_domain: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            user: &credentials.user,
            password: &credentials.password,
            company_id: credentials.company_id,
            company_domain: &credentials.company_domain,
        }
    }
}

/// Keys the login response may carry the token under, in priority order
const TOKEN_KEYS: [&str; 2] = ["api_token", "token"];

/// Extracts the bearer token from a login response
///
/// The token is read from `api_token` or `token` at the top level, falling
/// back to the same keys inside a nested `data` object.
#[must_use]
pub fn extract_token(body: &Value) -> Option<Token> {
    for key in TOKEN_KEYS {
        if let Some(token) = body
            .get(key)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
        {
            return Some(Token::new(token));
        }
    }
    match body.get("data") {
        Some(nested @ Value::Object(_)) => extract_token(nested),
        _ => None,
    }
}
