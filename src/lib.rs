/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # 3C Plus API Client
//!
//! Client library for the 3C Plus contact-center HTTP API.
//!
//! The crate is built around one authenticated session per [`AuthClient`]:
//! login acquires a bearer token that lives only in memory, every call that
//! needs it goes through a single executor that classifies failures, and a
//! token rejected by the server clears the session.
//!
//! [`MailingClient`] reuses that session to list campaigns, create mailing
//! containers, upload contacts and adjust the dialing weight of a container.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use threec_client::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! let auth = Arc::new(AuthClient::from_env()?);
//! auth.login().await?;
//!
//! let mailing = MailingClient::new(auth.clone());
//! let container = mailing.criar_mailing_container("Cobrança", 42).await?;
//! let contacts = vec![Contact::new("João").with_phone("+55 11 99999-9999")];
//! mailing.enviar_mailing_json(container.mailing_id, &contacts).await?;
//!
//! auth.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`Config::new`] reads a `.env` file and the `THREEC_*` environment
//! variables: `THREEC_USER`, `THREEC_PASSWORD`, `THREEC_COMPANY_ID`,
//! `THREEC_COMPANY_DOMAIN`, and optionally `THREEC_BASE_URL`,
//! `THREEC_TIMEOUT_SECS`, `THREEC_ENDPOINTS` (JSON overrides of the endpoint
//! table), `THREEC_MAX_RETRIES` and `THREEC_RETRY_BASE_DELAY_MS`.
//!
//! [`AuthClient`]: application::auth::AuthClient
//! [`MailingClient`]: application::services::mailing_service::MailingClient
//! [`Config::new`]: application::config::Config::new

/// Authentication, configuration and services
pub mod application;
/// Global constants
pub mod constants;
/// Error taxonomy
pub mod error;
/// Wire models, session state and the request executor
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Logging, environment and id helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
