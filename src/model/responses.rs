/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::error::AppError;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dialing campaign
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign id
    pub id: u64,
    /// Campaign name
    #[serde(default)]
    pub name: String,
    /// Whether the campaign is running; absent means active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Remaining fields as returned by the server
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    /// Whether the campaign is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    /// Case-insensitive substring match on the name
    #[must_use]
    pub fn name_contains(&self, filter: &str) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// A mailing container created for a campaign
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingContainer {
    /// Id assigned by the server
    pub mailing_id: u64,
    /// Campaign the container feeds
    pub campaign_id: u64,
    /// Name the container was created with
    pub name: String,
}

/// Result of a contact upload
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadResult {
    /// Accepted entries, or a flag, depending on the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Value>,
    /// Rejected entries
    #[serde(default)]
    pub failed: Vec<Value>,
    /// Remaining fields as returned by the server
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UploadResult {
    /// Whether the server rejected some of the entries
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Result of a weight adjustment
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightUpdateResult {
    /// Outcome flag, absent when the server only answers with a status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Server message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Remaining fields as returned by the server
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decodes an object payload, treating an empty body as an empty object
pub fn decode_object<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Reads the campaign list from a `data` or `campaigns` array, or a bare array
pub fn campaigns_from(body: Value) -> Result<Vec<Campaign>, AppError> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("campaigns")) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    Ok(serde_json::from_value(Value::Array(list))?)
}

/// Paths the container id may be found at, in priority order
const MAILING_ID_PATHS: [&[&str]; 4] = [&["data", "mailing_id"], &["data", "id"], &["mailing_id"], &["id"]];

/// Finds the container id in a creation response
///
/// Accepts an integer or a string of digits.
#[must_use]
pub fn extract_mailing_id(body: &Value) -> Option<u64> {
    MAILING_ID_PATHS.iter().find_map(|path| {
        let target = path.iter().try_fold(body, |node, key| node.get(*key))?;
        match target {
            Value::Number(n) => n.as_u64(),
            Value::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
                s.parse().ok()
            }
            _ => None,
        }
    })
}
