use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAILING_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, ENV_BASE_URL,
    ENV_COMPANY_DOMAIN, ENV_COMPANY_ID, ENV_ENDPOINTS, ENV_PASSWORD, ENV_TIMEOUT_SECS, ENV_USER,
};
use crate::error::AppError;
use crate::model::endpoint::{EndpointMap, EndpointOverrides};
use crate::model::retry::RetryPolicy;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Authentication credentials for the 3C Plus API
pub struct Credentials {
    /// Login email
    pub user: String,
    /// Login password, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Numeric company id
    pub company_id: u64,
    /// Company domain (subdomain of the tenant)
    pub company_domain: String,
}

impl Credentials {
    /// Creates a credentials set
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        company_id: u64,
        company_domain: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            company_id,
            company_domain: company_domain.into(),
        }
    }

    /// Checks that every field is filled in
    ///
    /// # Errors
    /// `AppError::InvalidInput` listing the missing fields.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();
        if self.user.trim().is_empty() {
            missing.push("user");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        if self.company_id == 0 {
            missing.push("company_id");
        }
        if self.company_domain.trim().is_empty() {
            missing.push("company_domain");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "incomplete credentials, missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("company_id", &self.company_id)
            .field("company_domain", &self.company_domain)
            .finish()
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Root of the 3C Plus REST API, without trailing slash
    pub base_url: String,
    /// Timeout in seconds for authentication calls
    pub timeout: u64,
    /// Timeout in seconds for mailing calls
    pub mailing_timeout: u64,
}

impl RestApiConfig {
    /// Creates a configuration for `base_url` with the default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: DEFAULT_TIMEOUT_SECS,
            mailing_timeout: DEFAULT_MAILING_TIMEOUT_SECS,
        }
    }

    /// Timeout applied to authentication calls
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Timeout applied to mailing calls
    #[must_use]
    pub fn mailing_timeout(&self) -> Duration {
        Duration::from_secs(self.mailing_timeout)
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim().trim_end_matches('/').to_string()
}

#[derive(Debug, Clone)]
/// Main configuration for the 3C Plus API client
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Logical operation to endpoint table
    pub endpoints: EndpointMap,
    /// Opt-in retry policy for transient failures, `None` disables retries
    pub retry: Option<RetryPolicy>,
    /// Parse failure of the endpoint overrides read from the environment
    pub endpoint_error: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the process environment
    ///
    /// Loads `.env` when present, then reads the `THREEC_*` variables.
    /// Missing credentials are logged and left empty; [`Config::validate`]
    /// reports them before any network call.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let user = get_env_or_default(ENV_USER, String::new());
        let password = get_env_or_default(ENV_PASSWORD, String::new());
        let company_id = get_env_or_default(ENV_COMPANY_ID, 0u64);
        let company_domain = get_env_or_default(ENV_COMPANY_DOMAIN, String::new());

        if user.is_empty() {
            error!("{ENV_USER} not found in environment variables or .env file");
        }
        if password.is_empty() {
            error!("{ENV_PASSWORD} not found in environment variables or .env file");
        }
        if company_id == 0 {
            error!("{ENV_COMPANY_ID} not found or invalid in environment variables or .env file");
        }
        if company_domain.is_empty() {
            error!("{ENV_COMPANY_DOMAIN} not found in environment variables or .env file");
        }

        let mut rest_api =
            RestApiConfig::new(get_env_or_default(ENV_BASE_URL, DEFAULT_BASE_URL.to_string()));
        // one override for both call families
        if let Some(timeout) = get_env_or_none::<u64>(ENV_TIMEOUT_SECS) {
            rest_api.timeout = timeout.max(1);
            rest_api.mailing_timeout = timeout.max(1);
        }

        let mut endpoint_error = None;
        let endpoints = match get_env_or_none::<String>(ENV_ENDPOINTS) {
            Some(raw) => match EndpointOverrides::from_json(&raw) {
                Ok(overrides) => EndpointMap::with_overrides(&overrides),
                Err(e) => {
                    error!("Invalid {ENV_ENDPOINTS}: {e}");
                    endpoint_error = Some(format!("invalid {ENV_ENDPOINTS}: {e}"));
                    EndpointMap::default()
                }
            },
            None => EndpointMap::default(),
        };

        Config {
            credentials: Credentials {
                user,
                password,
                company_id,
                company_domain,
            },
            rest_api,
            endpoints,
            retry: RetryPolicy::from_env(),
            endpoint_error,
        }
    }

    /// Creates a configuration from explicit credentials, without touching the environment
    pub fn from_credentials(credentials: Credentials) -> Self {
        Config {
            credentials,
            rest_api: RestApiConfig::default(),
            endpoints: EndpointMap::default(),
            retry: None,
            endpoint_error: None,
        }
    }

    /// Overrides the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest_api.base_url = normalize_base_url(base_url);
        self
    }

    /// Overrides the authentication and mailing timeouts, in seconds (at least 1)
    #[must_use]
    pub fn with_timeouts(mut self, timeout: u64, mailing_timeout: u64) -> Self {
        self.rest_api.timeout = timeout.max(1);
        self.rest_api.mailing_timeout = mailing_timeout.max(1);
        self
    }

    /// Applies endpoint overrides on top of the current table
    #[must_use]
    pub fn with_endpoint_overrides(mut self, overrides: &EndpointOverrides) -> Self {
        self.endpoints.apply(overrides);
        self
    }

    /// Enables the opt-in retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Checks the parts of the configuration a client cannot be built without
    ///
    /// # Errors
    /// `AppError::InvalidInput` for an empty base url or unparsable endpoint overrides.
    pub fn validate_transport(&self) -> Result<(), AppError> {
        if self.rest_api.base_url.is_empty() {
            return Err(AppError::InvalidInput("base url is empty".to_string()));
        }
        match &self.endpoint_error {
            Some(e) => Err(AppError::InvalidInput(e.clone())),
            None => Ok(()),
        }
    }

    /// Checks that the configuration can be used to log in
    ///
    /// # Errors
    /// `AppError::InvalidInput` for incomplete credentials, an empty base url
    /// or unparsable endpoint overrides.
    pub fn validate(&self) -> Result<(), AppError> {
        self.validate_transport()?;
        self.credentials.validate()
    }
}
