/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # 3C Plus Client Prelude
//!
//! Brings the commonly used types and traits into scope with a single import.
//!
//! ```rust,no_run
//! use threec_client::prelude::*;
//!
//! let auth = AuthClient::new(Config::new()).expect("http client");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Client configuration
pub use crate::application::config::{Config, Credentials, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION AND SESSION MANAGEMENT
// ============================================================================

/// Authentication client
pub use crate::application::auth::AuthClient;

/// Session state and token
pub use crate::model::session::{SessionState, Token};

// ============================================================================
// SERVICES
// ============================================================================

/// Mailing service trait and implementation
pub use crate::application::services::{MailingClient, MailingCreatedHook, MailingService};

// ============================================================================
// MODELS
// ============================================================================

/// Contact record
pub use crate::model::contact::{Contact, normalize_phone};

/// Endpoint table
pub use crate::model::endpoint::{
    Endpoint, EndpointMap, EndpointOverride, EndpointOverrides, HttpMethod, Operation,
};

/// Retry policy
pub use crate::model::retry::RetryPolicy;

/// Response models
pub use crate::model::responses::{Campaign, MailingContainer, UploadResult, WeightUpdateResult};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use serde_json::{Value, json};
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};
