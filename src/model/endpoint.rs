/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Endpoint map: logical operation name to concrete method and path
//!
//! The map is built once at construction from the defaults plus optional
//! overrides and is read-only afterwards. Overrides are an explicit structure
//! with one field per operation, so a misspelt key fails deserialization
//! instead of being silently ignored.

use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical operations the client knows how to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Token acquisition
    Login,
    /// Session check
    Verify,
    /// Token revocation
    Logout,
    /// Campaign listing
    ListCampaigns,
    /// Mailing container creation
    CreateMailing,
    /// Contact upload as JSON objects
    UploadJson,
    /// Contact upload as raw rows
    UploadArray,
    /// Contact upload as a CSV file
    UploadCsv,
    /// Mailing weight adjustment
    AdjustWeight,
}

impl Operation {
    /// Key used for this operation in the endpoint map
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Verify => "verify",
            Operation::Logout => "logout",
            Operation::ListCampaigns => "list_campaigns",
            Operation::CreateMailing => "create_mailing",
            Operation::UploadJson => "upload_json",
            Operation::UploadArray => "upload_array",
            Operation::UploadCsv => "upload_csv",
            Operation::AdjustWeight => "adjust_weight",
        }
    }

    /// Whether the operation is the token acquisition call
    #[must_use]
    pub fn is_login(&self) -> bool {
        matches!(self, Operation::Login)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP verbs used by the endpoint map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A concrete method and path pair
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base url, or an absolute `http(s)://` url
    pub path: String,
}

impl Endpoint {
    /// Creates an endpoint, dropping any leading `/` from relative paths
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if is_absolute(&path) {
            path
        } else {
            path.trim_start_matches('/').to_string()
        };
        Self { method, path }
    }

    /// Full url of this endpoint under `base_url`
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        if is_absolute(&self.path) {
            self.path.clone()
        } else {
            format!("{}/{}", base_url.trim_end_matches('/'), self.path)
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Override for a single operation: either a bare path (method kept) or a full endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointOverride {
    /// Replace only the path
    Path(String),
    /// Replace method and path
    Full(Endpoint),
}

/// Caller supplied overrides, one optional field per operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointOverrides {
    /// Login override
    pub login: Option<EndpointOverride>,
    /// Session check override
    pub verify: Option<EndpointOverride>,
    /// Logout override
    pub logout: Option<EndpointOverride>,
    /// Campaign listing override
    pub list_campaigns: Option<EndpointOverride>,
    /// Container creation override
    pub create_mailing: Option<EndpointOverride>,
    /// JSON upload override
    pub upload_json: Option<EndpointOverride>,
    /// Array upload override
    pub upload_array: Option<EndpointOverride>,
    /// CSV upload override
    pub upload_csv: Option<EndpointOverride>,
    /// Weight adjustment override
    pub adjust_weight: Option<EndpointOverride>,
}

impl EndpointOverrides {
    /// Parses overrides from a JSON object such as `{"verify": "users/me"}`
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Whether no operation is overridden
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Endpoint table used by the clients
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMap {
    /// Token acquisition
    pub login: Endpoint,
    /// Session check
    pub verify: Endpoint,
    /// Token revocation
    pub logout: Endpoint,
    /// Campaign listing
    pub list_campaigns: Endpoint,
    /// Mailing container creation
    pub create_mailing: Endpoint,
    /// Contact upload as JSON objects
    pub upload_json: Endpoint,
    /// Contact upload as raw rows
    pub upload_array: Endpoint,
    /// Contact upload as a CSV file
    pub upload_csv: Endpoint,
    /// Mailing weight adjustment
    pub adjust_weight: Endpoint,
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self {
            login: Endpoint::new(HttpMethod::Post, "authenticate"),
            verify: Endpoint::new(HttpMethod::Get, "me"),
            logout: Endpoint::new(HttpMethod::Get, "logout"),
            list_campaigns: Endpoint::new(HttpMethod::Get, "campaign/lists"),
            create_mailing: Endpoint::new(HttpMethod::Post, "create/mailing/list"),
            upload_json: Endpoint::new(HttpMethod::Post, "create/mailing/json"),
            upload_array: Endpoint::new(HttpMethod::Post, "create/mailing/by/array"),
            upload_csv: Endpoint::new(HttpMethod::Post, "mailing/list/csv"),
            adjust_weight: Endpoint::new(HttpMethod::Put, "update/weight"),
        }
    }
}

impl EndpointMap {
    /// Default table with `overrides` applied on top
    #[must_use]
    pub fn with_overrides(overrides: &EndpointOverrides) -> Self {
        let mut map = Self::default();
        map.apply(overrides);
        map
    }

    /// Applies `overrides` in place
    pub fn apply(&mut self, overrides: &EndpointOverrides) {
        let pairs = [
            (&mut self.login, &overrides.login),
            (&mut self.verify, &overrides.verify),
            (&mut self.logout, &overrides.logout),
            (&mut self.list_campaigns, &overrides.list_campaigns),
            (&mut self.create_mailing, &overrides.create_mailing),
            (&mut self.upload_json, &overrides.upload_json),
            (&mut self.upload_array, &overrides.upload_array),
            (&mut self.upload_csv, &overrides.upload_csv),
            (&mut self.adjust_weight, &overrides.adjust_weight),
        ];
        for (slot, replacement) in pairs {
            match replacement {
                Some(EndpointOverride::Path(path)) => *slot = Endpoint::new(slot.method, path.clone()),
                Some(EndpointOverride::Full(endpoint)) => {
                    *slot = Endpoint::new(endpoint.method, endpoint.path.clone())
                }
                None => {}
            }
        }
    }

    /// Endpoint configured for `operation`
    #[must_use]
    pub fn get(&self, operation: Operation) -> &Endpoint {
        match operation {
            Operation::Login => &self.login,
            Operation::Verify => &self.verify,
            Operation::Logout => &self.logout,
            Operation::ListCampaigns => &self.list_campaigns,
            Operation::CreateMailing => &self.create_mailing,
            Operation::UploadJson => &self.upload_json,
            Operation::UploadArray => &self.upload_array,
            Operation::UploadCsv => &self.upload_csv,
            Operation::AdjustWeight => &self.adjust_weight,
        }
    }
}
