/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Authentication module for the 3C Plus API
//!
//! [`AuthClient`] owns the session state and drives its lifecycle:
//! - `login` acquires a token and marks the session authenticated
//! - `verificar_sessao` checks the token against the server
//! - `logout` revokes the token and always ends unauthenticated locally
//!
//! Every call that needs a token goes through [`AuthClient::send_authenticated`],
//! which is the single place where the authorization precondition is enforced
//! and where a rejected token clears the session.

use crate::application::config::{Config, Credentials};
use crate::error::AppError;
use crate::model::auth::{LoginRequest, extract_token};
use crate::model::endpoint::Operation;
use crate::model::http::{ApiCall, HttpExecutor, RequestBody};
use crate::model::retry::RetryPolicy;
use crate::model::session::{SessionState, Token};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Authentication client for the 3C Plus API
///
/// One instance owns exactly one session. It is not meant to be driven by
/// several tasks at once; share it through `Arc` only to hand it to a
/// [`MailingClient`](crate::application::services::mailing_service::MailingClient).
pub struct AuthClient {
    config: Arc<Config>,
    executor: HttpExecutor,
    session: RwLock<SessionState>,
}

impl AuthClient {
    /// Creates an unauthenticated client
    ///
    /// # Arguments
    /// * `config` - Credentials, API root, endpoint table and retry policy
    ///
    /// # Errors
    /// * `InvalidInput` - Empty base url or unparsable endpoint overrides
    /// * `ApiUnavailable` - The HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        config.validate_transport()?;
        let executor = HttpExecutor::new(config.rest_api.base_url.clone(), config.rest_api.timeout())?;
        let session = SessionState::new(
            config.credentials.company_id,
            config.credentials.company_domain.clone(),
            config.rest_api.base_url.clone(),
        );
        Ok(Self {
            config: Arc::new(config),
            executor,
            session: RwLock::new(session),
        })
    }

    /// Creates an unauthenticated client configured from the environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(Config::new())
    }

    /// Installs an opt-in retry policy for transient failures
    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        Arc::make_mut(&mut self.config).retry = Some(policy);
        self
    }

    /// Configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// API root
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Company id the session belongs to
    #[must_use]
    pub fn company_id(&self) -> u64 {
        self.config.credentials.company_id
    }

    /// Company domain the session belongs to
    #[must_use]
    pub fn company_domain(&self) -> &str {
        &self.config.credentials.company_domain
    }

    /// Whether a token is currently held
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// When the current token was obtained, `None` when unauthenticated
    pub async fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.session.read().await.authenticated_at()
    }

    /// Logs in with the configured credentials
    ///
    /// # Errors
    /// * `InvalidInput` - Incomplete credentials, no call made
    /// * `InvalidCredentials` - The server rejected the credentials
    /// * `RateLimitExceeded` / `ApiUnavailable` - Transient failures
    pub async fn login(&self) -> Result<(), AppError> {
        let credentials = self.config.credentials.clone();
        self.login_with(&credentials).await
    }

    /// Logs in with explicit credentials of the configured company
    ///
    /// A successful login replaces any token already held. On failure the
    /// session is left as it was.
    pub async fn login_with(&self, credentials: &Credentials) -> Result<(), AppError> {
        credentials.validate()?;
        {
            let session = self.session.read().await;
            if credentials.company_id != session.company_id()
                || credentials.company_domain != session.company_domain()
            {
                return Err(AppError::InvalidInput(
                    "credentials belong to a different company than this client".to_string(),
                ));
            }
        }

        let body = RequestBody::json(&LoginRequest::from(credentials))?;
        let call = ApiCall::new(Operation::Login, self.config.endpoints.get(Operation::Login))
            .with_body(&body)
            .with_timeout(self.config.rest_api.timeout());

        debug!("Sending login request for company {}", credentials.company_domain);
        let response = self.send(&call).await?;
        let token = extract_token(&response)
            .ok_or_else(|| AppError::malformed("login response carries no token"))?;

        let mut session = self.session.write().await;
        if session.is_authenticated() {
            debug!("Replacing the current session token");
        }
        session.set(token);

        info!("✓ Login successful, company: {}", credentials.company_domain);
        Ok(())
    }

    /// Checks the current token against the server
    ///
    /// # Returns
    /// * `Ok(Map)` - Session and user fields (name, email, company, ...)
    /// * `Err(AppError::Unauthorized)` - Not logged in, no call made
    /// * `Err(AppError::TokenExpired)` - Token rejected; the session is now cleared
    pub async fn verificar_sessao(&self) -> Result<Map<String, Value>, AppError> {
        let body = self
            .send_authenticated(Operation::Verify, None, self.config.rest_api.timeout(), false)
            .await?;
        match body {
            Value::Object(map) => {
                debug!("Session verified");
                Ok(map)
            }
            _ => Err(AppError::malformed("session check did not return an object")),
        }
    }

    /// Logs out
    ///
    /// The local session is cleared whatever the outcome of the server call;
    /// a server failure is still reported afterwards.
    ///
    /// # Errors
    /// * `Unauthorized` - Not logged in, no call made
    /// * Any classified failure of the logout call
    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self
            .send_authenticated(Operation::Logout, None, self.config.rest_api.timeout(), false)
            .await;
        if let Err(AppError::Unauthorized) = result {
            return Err(AppError::Unauthorized);
        }

        self.session.write().await.clear();
        match result {
            Ok(_) => {
                info!("✓ Logged out successfully");
                Ok(())
            }
            Err(e) => {
                warn!("Logout call failed, session cleared locally");
                Err(e)
            }
        }
    }

    /// Runs one call that requires a token
    ///
    /// Fails with `Unauthorized` before any network activity when the session
    /// holds no token. A `TokenExpired` answer clears the session before the
    /// error is returned, so the next call does not reuse a dead token.
    pub(crate) async fn send_authenticated(
        &self,
        operation: Operation,
        body: Option<&RequestBody>,
        timeout: Duration,
        idempotent: bool,
    ) -> Result<Value, AppError> {
        let token = self.session.read().await.require_authenticated()?;

        let mut call = ApiCall::new(operation, self.config.endpoints.get(operation))
            .with_token(&token)
            .with_timeout(timeout);
        call.body = body;
        if idempotent {
            call = call.idempotent();
        }

        let result = self.send(&call).await;
        if let Err(AppError::TokenExpired { .. }) = &result {
            self.invalidate(&token).await;
        }
        result
    }

    /// Clears the session if it still holds `token`
    async fn invalidate(&self, token: &Token) {
        let mut session = self.session.write().await;
        if session.require_authenticated().ok().as_ref() == Some(token) {
            session.clear();
            info!("Token rejected by the server, session cleared");
        }
    }

    /// Executes a call, wrapped in the retry policy when one is configured
    async fn send(&self, call: &ApiCall<'_>) -> Result<Value, AppError> {
        let executor = &self.executor;
        match &self.config.retry {
            Some(policy) => policy.run(move || executor.execute(call)).await,
            None => executor.execute(call).await,
        }
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("base_url", &self.executor.base_url())
            .field("company_domain", &self.config.credentials.company_domain)
            .finish()
    }
}
