/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
/// Login request and token extraction
pub mod auth;
/// Contact record uploaded into mailing containers
pub mod contact;
/// Logical operations and the endpoint table
pub mod endpoint;
/// Request executor and error classification
pub mod http;
/// Request models for API calls
pub mod requests;
/// Response models from API calls
pub mod responses;
/// Opt-in retry policy for transient failures
pub mod retry;
/// Bearer token and session state
pub mod session;
